//! Sign-based graha drishti (Parashari full aspects).
//!
//! Every graha fully aspects the 7th sign from itself. Mars additionally
//! aspects the 4th and 8th, Jupiter the 5th and 9th, Saturn the 3rd and 10th.
//! Houses are counted inclusively (the occupied sign is the 1st).

use crate::graha::Graha;
use crate::house::house_from;
use crate::rashi::Rashi;

/// Houses (counted from the graha's sign) that `graha` fully aspects.
pub const fn aspected_houses(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mangal => &[4, 7, 8],
        Graha::Guru => &[5, 7, 9],
        Graha::Shani => &[3, 7, 10],
        _ => &[7],
    }
}

/// Does `graha` placed in `from` aspect the sign `target`?
pub fn aspects_sign(graha: Graha, from: Rashi, target: Rashi) -> bool {
    aspected_houses(graha).contains(&house_from(from, target))
}

/// All signs aspected by `graha` placed in `from`.
pub fn aspected_signs(graha: Graha, from: Rashi) -> Vec<Rashi> {
    aspected_houses(graha)
        .iter()
        .map(|&h| from.offset(h - 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_aspects_seventh() {
        for g in crate::graha::ALL_GRAHAS {
            assert!(aspects_sign(g, Rashi::Mesha, Rashi::Tula), "{g:?}");
        }
    }

    #[test]
    fn jupiter_trinal_aspects() {
        assert!(aspects_sign(Graha::Guru, Rashi::Mesha, Rashi::Simha));
        assert!(aspects_sign(Graha::Guru, Rashi::Mesha, Rashi::Dhanu));
        assert!(!aspects_sign(Graha::Guru, Rashi::Mesha, Rashi::Karka));
    }

    #[test]
    fn mars_and_saturn_special() {
        assert!(aspects_sign(Graha::Mangal, Rashi::Mesha, Rashi::Karka));
        assert!(aspects_sign(Graha::Mangal, Rashi::Mesha, Rashi::Vrischika));
        assert!(aspects_sign(Graha::Shani, Rashi::Mesha, Rashi::Mithuna));
        assert!(aspects_sign(Graha::Shani, Rashi::Mesha, Rashi::Makara));
        assert!(!aspects_sign(Graha::Surya, Rashi::Mesha, Rashi::Karka));
    }

    #[test]
    fn aspected_signs_wrap() {
        let signs = aspected_signs(Graha::Guru, Rashi::Dhanu);
        assert_eq!(signs, vec![Rashi::Mesha, Rashi::Mithuna, Rashi::Simha]);
    }
}
