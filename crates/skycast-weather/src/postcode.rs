//! UK postcode format validation.
//!
//! Pure and synchronous: checks shape only, it does not confirm the postcode
//! exists. The accepted shapes are an outward code of `A9`, `A99`, `A9A`,
//! `AA9`, `AA99` or `AA9A`, an optional single space, then an inward code of
//! `9AA`. Letters are matched case-insensitively.

const INWARD_LEN: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
    Letter,
    Digit,
}

fn classify(c: char) -> Option<Class> {
    if c.is_ascii_alphabetic() {
        Some(Class::Letter)
    } else if c.is_ascii_digit() {
        Some(Class::Digit)
    } else {
        None
    }
}

fn outward_is_valid(outward: &[char]) -> bool {
    use Class::{Digit as D, Letter as L};

    let Some(shape) = outward.iter().map(|c| classify(*c)).collect::<Option<Vec<_>>>() else {
        return false;
    };

    matches!(
        shape.as_slice(),
        [L, D] | [L, D, D] | [L, D, L] | [L, L, D] | [L, L, D, D] | [L, L, D, L]
    )
}

fn inward_is_valid(inward: &[char]) -> bool {
    matches!(
        inward.iter().map(|c| classify(*c)).collect::<Vec<_>>().as_slice(),
        [Some(Class::Digit), Some(Class::Letter), Some(Class::Letter)]
    )
}

/// Check `candidate` against the GB postcode format. Surrounding whitespace is
/// not trimmed here; callers decide whether to trim first.
pub fn is_valid_uk_postcode(candidate: &str) -> bool {
    let chars: Vec<char> = candidate.chars().collect();
    if chars.len() <= INWARD_LEN {
        return false;
    }

    let (outward, inward) = chars.split_at(chars.len() - INWARD_LEN);
    let outward = outward.strip_suffix(&[' ']).unwrap_or(outward);

    outward_is_valid(outward) && inward_is_valid(inward)
}
