use image::Rgb;


/// Linear interpolation from `base` toward `transparent` by `alpha`,
/// truncated toward zero per channel.
pub fn mix(base: &Rgb<u8>, transparent: &Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let channel = |i: usize| {
        let b = base[i] as f64;
        let t = transparent[i] as f64;
        (b + (t - b) * alpha) as u8
    };
    Rgb::from([channel(0), channel(1), channel(2)])
}
