//! Whole-sign house assignment relative to the ascendant.
//!
//! `house = ((body_sign - ascendant_sign + 12) mod 12) + 1`; the ascendant
//! itself is always house 1.

use crate::graha::{Graha, rashi_lord};
use crate::rashi::Rashi;

/// Angular houses.
pub const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];
/// Trinal houses.
pub const TRIKONA_HOUSES: [u8; 3] = [1, 5, 9];
/// Houses of loss and obstacle.
pub const DUSTHANA_HOUSES: [u8; 3] = [6, 8, 12];
/// Houses of growth.
pub const UPACHAYA_HOUSES: [u8; 4] = [3, 6, 10, 11];
/// Succedent houses.
pub const PANAPHARA_HOUSES: [u8; 4] = [2, 5, 8, 11];
/// Cadent houses.
pub const APOKLIMA_HOUSES: [u8; 4] = [3, 6, 9, 12];

/// House (1..=12) of the sign `body` counted from the sign `from`.
pub const fn house_from(from: Rashi, body: Rashi) -> u8 {
    house_between(from.index(), body.index())
}

/// House distance between two 0-based sign indices, 1..=12.
pub const fn house_between(from_idx: u8, to_idx: u8) -> u8 {
    ((to_idx as i16 - from_idx as i16 + 12) % 12) as u8 + 1
}

/// Sign occupying `house` (1..=12) for a given ascendant.
pub const fn sign_of_house(ascendant: Rashi, house: u8) -> Rashi {
    ascendant.offset((house + 11) % 12)
}

/// Lord of `house` (1..=12) for a given ascendant.
pub const fn house_lord(ascendant: Rashi, house: u8) -> Graha {
    rashi_lord(sign_of_house(ascendant, house))
}

pub fn is_kendra(house: u8) -> bool {
    KENDRA_HOUSES.contains(&house)
}

pub fn is_trikona(house: u8) -> bool {
    TRIKONA_HOUSES.contains(&house)
}

pub fn is_dusthana(house: u8) -> bool {
    DUSTHANA_HOUSES.contains(&house)
}

pub fn is_upachaya(house: u8) -> bool {
    UPACHAYA_HOUSES.contains(&house)
}

pub fn is_panaphara(house: u8) -> bool {
    PANAPHARA_HOUSES.contains(&house)
}

pub fn is_apoklima(house: u8) -> bool {
    APOKLIMA_HOUSES.contains(&house)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascendant_is_first_house() {
        for r in crate::rashi::ALL_RASHIS {
            assert_eq!(house_from(r, r), 1);
        }
    }

    #[test]
    fn house_wraps() {
        assert_eq!(house_from(Rashi::Makara, Rashi::Mesha), 4);
        assert_eq!(house_from(Rashi::Mesha, Rashi::Meena), 12);
        assert_eq!(house_from(Rashi::Meena, Rashi::Mesha), 2);
    }

    #[test]
    fn sign_of_house_inverts_house_from() {
        for asc in crate::rashi::ALL_RASHIS {
            for h in 1..=12u8 {
                assert_eq!(house_from(asc, sign_of_house(asc, h)), h);
            }
        }
    }

    #[test]
    fn house_lords_for_aries_lagna() {
        assert_eq!(house_lord(Rashi::Mesha, 1), Graha::Mangal);
        assert_eq!(house_lord(Rashi::Mesha, 9), Graha::Guru);
        assert_eq!(house_lord(Rashi::Mesha, 10), Graha::Shani);
    }

    #[test]
    fn classification() {
        assert!(is_kendra(7) && !is_kendra(5));
        assert!(is_trikona(1) && is_trikona(9));
        assert!(is_dusthana(8) && !is_dusthana(9));
        assert!(is_upachaya(11));
        assert!(is_panaphara(2) && is_apoklima(12));
    }
}
