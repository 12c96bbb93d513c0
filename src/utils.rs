/// [Szudzik pairing function][szudzik-pairing].
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// [szudzik-pairing]: https://en.wikipedia.org/wiki/Pairing_function
pub fn pairing_szudzik(a: u64, b: u64) -> u64 {
    if a < b {
        b * b + a
    } else {
        a * a + a + b
    }
}

/// [Pairing function][pairing] for two `u64` values.
///
/// Injective for inputs below `2^32`, which makes it suitable as a
/// collision-free dedup key for pairs of state ids.
///
/// [pairing]: https://en.wikipedia.org/wiki/Pairing_function
pub fn pairing2(a: u64, b: u64) -> u64 {
    pairing_szudzik(a, b)
}
