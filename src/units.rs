pub trait IsPlural: PartialEq {
    fn is_singular(&self) -> bool;
    fn is_plural(&self) -> bool {
        !self.is_singular()
    }
}

macro_rules ! impl_is_singular {
    ($($ty:ty: [$pos:literal$(, $neg:literal)?]),*) => {
        $(
            impl IsPlural for $ty {
                fn is_singular(&self) -> bool {
                    if self == &$pos {
                        true
                    }
                    $(
                        else if self == &$neg {
                            true
                        }
                    )?
                     else {
                        false
                     }
                }
            }
        )*
    }
}

impl_is_singular!(
    u8: [1],
    i32: [1, -1],
    f32: [1.0, -1.0],
    f64: [1.0, -1.0]
);

macro_rules ! unit {
    {
        $($name:ident = [$short:expr, $singular:literal, $plural:literal, $precision:literal],)*
    } => {
        /// The unit of a decoded value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Unit {
            $($name,)*
        }

        impl Unit {
            fn short_display(&self) -> Option<&str> {
                match self {
                    $(Self::$name => $short,)*
                }
            }

            fn plural_display(&self) -> &str {
                match self {
                    $(Self::$name => $plural,)*
                }
            }

            fn singular_display(&self) -> &str {
                match self {
                    $(Self::$name => $singular,)*
                }
            }

            /// Number of decimals worth showing, given the wire resolution.
            pub fn precision(&self) -> usize {
                match self {
                    $(Self::$name => $precision,)*
                }
            }

            fn display_str(&self, short: bool, plural: bool) -> &str {
                let short_value = if short {
                    self.short_display()
                } else {
                    None
                };

                if let Some(short_value) = short_value {
                    short_value
                } else if plural {
                    self.plural_display()
                } else {
                    self.singular_display()
                }
            }

            pub fn display<T>(&self, short: bool, value: T) -> String
                where T: IsPlural + core::fmt::Display,
            {
                let precision = self.precision();
                format!("{:.precision$} {}", value, self.display_str(short, value.is_plural()))
            }
        }
    }
}

unit! {
    Volt = [Some("V"), "Volt", "Volts", 3],
    DegreesCelsius = [Some("°C"), "Degree Celsius", "Degrees Celsius", 2],
    DegreesFahrenheit = [Some("°F"), "Degree Fahrenheit", "Degrees Fahrenheit", 1],
    Percent = [Some("%"), "Percent", "Percent", 1],
    WattPerSquareMeter = [Some("W/m²"), "Watt per square meter", "Watts per square meter", 3],
    Boot = [None, "Boot", "Boots", 0],
}

#[test]
fn display_tests() {
    use Unit::*;

    assert_eq!("32 °C", DegreesCelsius.display(true, 32));
    assert_eq!("25.55 Degrees Celsius", DegreesCelsius.display(false, 25.55));
    assert_eq!("1 Degree Celsius", DegreesCelsius.display(false, 1));
    assert_eq!("-0.500 V", Volt.display(true, -0.5));
    assert_eq!("55.5 %", Percent.display(true, 55.50011));
    assert_eq!("1 Boot", Boot.display(true, 1u8));
    assert_eq!("43 Boots", Boot.display(true, 43.0));
}
