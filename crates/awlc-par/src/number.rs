//! Classification of integer literals by minimal representable width.

use awlc_util::Span;

/// The bit width of a classified literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }
}

/// A numeric literal classified to its minimal width and signedness.
///
/// The value is kept as `i128` so both the full unsigned `u64` range and the
/// full signed `s64` range fit without a second representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Number {
    pub span: Span,
    pub width: Width,
    pub signed: bool,
    pub value: i128,
}

impl Number {
    /// Classifies `value` per the rule: non-negative values take the
    /// smallest unsigned width whose maximum is `>= value`; negative values
    /// take the smallest signed width whose range contains `value`.
    pub fn classify(value: i128, span: Span) -> Self {
        if value >= 0 {
            let width = if value <= u8::MAX as i128 {
                Width::W8
            } else if value <= u16::MAX as i128 {
                Width::W16
            } else if value <= u32::MAX as i128 {
                Width::W32
            } else {
                Width::W64
            };
            Number { span, width, signed: false, value }
        } else {
            let width = if value >= i8::MIN as i128 {
                Width::W8
            } else if value >= i16::MIN as i128 {
                Width::W16
            } else if value >= i32::MIN as i128 {
                Width::W32
            } else {
                Width::W64
            };
            Number { span, width, signed: true, value }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i128) -> Number {
        Number::classify(v, Span::DUMMY)
    }

    #[test]
    fn zero_is_u8() {
        let num = n(0);
        assert_eq!(num.width, Width::W8);
        assert!(!num.signed);
    }

    #[test]
    fn max_u8_stays_u8_next_value_promotes() {
        assert_eq!(n(255).width, Width::W8);
        assert_eq!(n(256).width, Width::W16);
    }

    #[test]
    fn widens_through_u16_u32_u64() {
        assert_eq!(n(65535).width, Width::W16);
        assert_eq!(n(65536).width, Width::W32);
        assert_eq!(n(4294967295).width, Width::W32);
        assert_eq!(n(4294967296).width, Width::W64);
    }

    #[test]
    fn negative_one_is_signed_8_bit() {
        let num = n(-1);
        assert_eq!(num.width, Width::W8);
        assert!(num.signed);
    }

    #[test]
    fn negative_widens_through_signed_ladder() {
        assert_eq!(n(-128).width, Width::W8);
        assert_eq!(n(-129).width, Width::W16);
        assert_eq!(n(-32768).width, Width::W16);
        assert_eq!(n(-32769).width, Width::W32);
        assert_eq!(n(-2147483648).width, Width::W32);
        assert_eq!(n(-2147483649).width, Width::W64);
    }

    #[test]
    fn power_of_two_forty_is_64_bit() {
        let num = n(1_099_511_627_776);
        assert_eq!(num.width, Width::W64);
        assert!(!num.signed);
    }
}
