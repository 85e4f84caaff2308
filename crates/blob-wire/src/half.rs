/// Widen an IEEE 754 half-precision bit pattern to `f32`.
///
/// Layout: 1 sign bit, 5 exponent bits (bias 15), 10 fraction bits.
///
/// ```text
///   exponent 0      → ±2^-14 × (fraction / 1024)        (subnormal)
///   exponent 31     → ±inf if fraction == 0, else NaN
///   otherwise       → ±2^(exponent-15) × (1 + fraction / 1024)
/// ```
#[must_use]
pub fn f16_bits_to_f32(bits: u16) -> f32 {
    let sign = if bits & 0x8000 == 0 { 1.0 } else { -1.0 };
    let exponent = i32::from((bits >> 10) & 0x1F);
    let fraction_bits = bits & 0x03FF;
    let fraction = f32::from(fraction_bits);

    match exponent {
        0 => sign * 2f32.powi(-14) * (fraction / 1024.0),
        0x1F if fraction_bits == 0 => sign * f32::INFINITY,
        0x1F => f32::NAN,
        _ => sign * 2f32.powi(exponent - 15) * (1.0 + fraction / 1024.0),
    }
}
