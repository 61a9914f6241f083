//! # Wrapping existing methods
//!
//! Standard operations on `MixedFraction`, simply wrapping the operations already defined on the
//! inner type.

mod creation {
    use num::{BigInt, BigRational};

    use crate::data::number_types::fraction::MixedFraction;

    macro_rules! from_integer {
        ($($t:ty),*) => {
            $(
                impl From<$t> for MixedFraction {
                    fn from(value: $t) -> Self {
                        Self(BigRational::from_integer(BigInt::from(value)))
                    }
                }
            )*
        };
    }
    from_integer!(i32, i64, u32, u64, usize);

    impl From<BigInt> for MixedFraction {
        fn from(value: BigInt) -> Self {
            Self(BigRational::from_integer(value))
        }
    }

    impl From<&BigInt> for MixedFraction {
        fn from(value: &BigInt) -> Self {
            Self(BigRational::from_integer(value.clone()))
        }
    }
}

mod identities {
    use num::{One, Zero};

    use crate::data::number_types::fraction::MixedFraction;

    impl Zero for MixedFraction {
        fn zero() -> Self {
            Self(Zero::zero())
        }

        fn is_zero(&self) -> bool {
            self.0.is_zero()
        }
    }

    impl One for MixedFraction {
        fn one() -> Self {
            Self(One::one())
        }
    }
}

mod field {
    use std::iter::Sum;
    use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

    use crate::data::number_types::fraction::MixedFraction;

    /// All four owned and borrowed combinations of a binary operator.
    macro_rules! forward_binop {
        ($trait:ident, $method:ident) => {
            impl $trait for MixedFraction {
                type Output = MixedFraction;

                fn $method(self, rhs: Self) -> Self::Output {
                    MixedFraction($trait::$method(self.0, rhs.0))
                }
            }

            impl $trait<&MixedFraction> for MixedFraction {
                type Output = MixedFraction;

                fn $method(self, rhs: &MixedFraction) -> Self::Output {
                    MixedFraction($trait::$method(self.0, &rhs.0))
                }
            }

            impl $trait<MixedFraction> for &MixedFraction {
                type Output = MixedFraction;

                fn $method(self, rhs: MixedFraction) -> Self::Output {
                    MixedFraction($trait::$method(&self.0, rhs.0))
                }
            }

            impl $trait<&MixedFraction> for &MixedFraction {
                type Output = MixedFraction;

                fn $method(self, rhs: &MixedFraction) -> Self::Output {
                    MixedFraction($trait::$method(&self.0, &rhs.0))
                }
            }
        };
    }

    forward_binop!(Add, add);
    forward_binop!(Sub, sub);
    forward_binop!(Mul, mul);
    // Panics on a zero divisor, like the inner type. Use `checked_div` when that can happen.
    forward_binop!(Div, div);

    impl AddAssign<&MixedFraction> for MixedFraction {
        fn add_assign(&mut self, rhs: &MixedFraction) {
            self.0 += &rhs.0;
        }
    }

    impl AddAssign for MixedFraction {
        fn add_assign(&mut self, rhs: Self) {
            self.0 += rhs.0;
        }
    }

    impl SubAssign<&MixedFraction> for MixedFraction {
        fn sub_assign(&mut self, rhs: &MixedFraction) {
            self.0 -= &rhs.0;
        }
    }

    impl SubAssign for MixedFraction {
        fn sub_assign(&mut self, rhs: Self) {
            self.0 -= rhs.0;
        }
    }

    impl MulAssign<&MixedFraction> for MixedFraction {
        fn mul_assign(&mut self, rhs: &MixedFraction) {
            self.0 *= &rhs.0;
        }
    }

    impl Neg for MixedFraction {
        type Output = Self;

        fn neg(self) -> Self::Output {
            Self(-self.0)
        }
    }

    impl Neg for &MixedFraction {
        type Output = MixedFraction;

        fn neg(self) -> Self::Output {
            MixedFraction(-&self.0)
        }
    }

    impl Sum for MixedFraction {
        fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
            Self(iter.map(|item| item.0).sum())
        }
    }
}
