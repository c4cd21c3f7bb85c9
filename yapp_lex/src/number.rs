use num::traits::Signed;
use num::{BigInt, Zero};
use std::fmt::Display;

/// Value of a number literal: `val * 10^exp`.
#[derive(Debug, PartialEq, Eq, Clone, Default, Hash)]
pub struct Number {
    pub val: BigInt,
    pub exp: BigInt,
}

impl Number {
    pub fn new<T>(val: T, exp: T) -> Self
    where
        T: Into<BigInt>,
    {
        Self {
            val: val.into(),
            exp: exp.into(),
        }
    }

    /// Moves trailing zeros of `val` into `exp`.
    fn normalized(&self) -> (BigInt, BigInt) {
        let mut val = self.val.clone();
        let mut exp = self.exp.clone();
        while !val.is_zero() && (&val % 10u8).is_zero() {
            val /= 10u8;
            exp += 1u8;
        }
        (val, exp)
    }

    pub fn is_int(&self) -> bool {
        let (val, exp) = self.normalized();
        val.is_zero() || !exp.is_negative()
    }

    fn to_int(&self) -> Result<BigInt, TryFromNumberError> {
        let (val, exp) = self.normalized();
        if val.is_zero() {
            return Ok(val);
        }
        if exp.is_negative() {
            return Err(TryFromNumberError::NotInt);
        }

        let exp = u32::try_from(exp).map_err(|_| TryFromNumberError::OutOfRange)?;
        if exp > 38 {
            return Err(TryFromNumberError::OutOfRange);
        }
        Ok(val * BigInt::from(10u8).pow(exp))
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.exp.is_zero() {
            write!(f, "{}", self.val)
        } else {
            write!(f, "{}e{}", self.val, self.exp)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TryFromNumberError {
    NotInt,
    OutOfRange,
}

macro_rules! number_try_into {
    ($target: ty) => {
        impl TryFrom<&Number> for $target {
            type Error = TryFromNumberError;
            fn try_from(value: &Number) -> Result<Self, Self::Error> {
                let val = value.to_int()?;
                <$target>::try_from(val).map_err(|_| TryFromNumberError::OutOfRange)
            }
        }
    };
}

number_try_into!(i32);
number_try_into!(i64);
number_try_into!(u32);
number_try_into!(u64);

impl TryFrom<&Number> for f64 {
    type Error = std::num::ParseFloatError;
    fn try_from(value: &Number) -> Result<Self, Self::Error> {
        format!("{}e{}", value.val, value.exp).parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_integer_conversion() {
        assert_eq!(i64::try_from(&Number::new(123, 0)), Ok(123));
        assert_eq!(i64::try_from(&Number::new(1200, -2)), Ok(12));
        assert_eq!(u32::try_from(&Number::new(5, 2)), Ok(500));
        assert_eq!(i32::try_from(&Number::new(0, -7)), Ok(0));
        assert_eq!(i64::try_from(&Number::new(15, -1)), Err(TryFromNumberError::NotInt));
        assert_eq!(u32::try_from(&Number::new(1, 10)), Err(TryFromNumberError::OutOfRange));
        assert_eq!(u64::try_from(&Number::new(-1, 0)), Err(TryFromNumberError::OutOfRange));
    }

    #[test]
    fn test_is_int() {
        assert!(Number::new(10, -1).is_int());
        assert!(!Number::new(11, -1).is_int());
        assert!(Number::new(0, -3).is_int());
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(f64::try_from(&Number::new(125, -2)), Ok(1.25));
        assert_eq!(Number::new(125, -2).to_string(), "125e-2");
        assert_eq!(Number::new(7, 0).to_string(), "7");
    }
}
