//! Persisted receiver settings. The only persisted setting is the serial data
//! rate, stored as a single byte in an external key-value byte store (an
//! EEPROM cell on the original hardware).

/// Store key of the data rate byte.
pub const DATA_RATE_KEY: u16 = 10;

/// Baud rate multiplied by [`DataRate::multiplier`].
pub const BASE_BAUD: u32 = 4800;

const MULTIPLIERS: [u8; 8] = [1, 2, 3, 4, 6, 8, 12, 24];

/// Byte-addressed persistent storage.
pub trait ConfigStore {
    type Error;

    fn read_byte(&mut self, key: u16) -> Result<u8, Self::Error>;

    fn write_byte(&mut self, key: u16, value: u8) -> Result<(), Self::Error>;
}

impl<T> ConfigStore for &mut T
where
    T: ConfigStore,
{
    type Error = T::Error;

    fn read_byte(&mut self, key: u16) -> Result<u8, Self::Error> {
        (*self).read_byte(key)
    }

    fn write_byte(&mut self, key: u16, value: u8) -> Result<(), Self::Error> {
        (*self).write_byte(key, value)
    }
}

/// Index into the table of supported data rates, 4800 to 115200 baud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataRate(u8);

impl DataRate {
    pub const MAX: Self = Self(MULTIPLIERS.len() as u8 - 1);

    /// Indices past the table select the fastest rate.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        if index > Self::MAX.0 {
            Self::MAX
        } else {
            Self(index)
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn multiplier(self) -> u8 {
        MULTIPLIERS[self.0 as usize]
    }

    #[inline]
    #[must_use]
    pub const fn baud(self) -> u32 {
        BASE_BAUD * self.multiplier() as u32
    }

    pub fn load<S: ConfigStore>(store: &mut S) -> Result<Self, S::Error> {
        store.read_byte(DATA_RATE_KEY).map(Self::new)
    }

    pub fn save<S: ConfigStore>(self, store: &mut S) -> Result<(), S::Error> {
        store.write_byte(DATA_RATE_KEY, self.0)
    }
}

impl Default for DataRate {
    fn default() -> Self {
        Self(0)
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub data_rate: DataRate,
    /// Keep byte and checksum counters.
    pub statistics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_rate: DataRate::default(),
            statistics: true,
        }
    }
}

impl Config {
    /// Default settings with the data rate read from `store`.
    pub fn load<S: ConfigStore>(store: &mut S) -> Result<Self, S::Error> {
        Ok(Self {
            data_rate: DataRate::load(store)?,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Eeprom([u8; 16]);

    impl ConfigStore for Eeprom {
        type Error = ();

        fn read_byte(&mut self, key: u16) -> Result<u8, ()> {
            self.0.get(key as usize).copied().ok_or(())
        }

        fn write_byte(&mut self, key: u16, value: u8) -> Result<(), ()> {
            *self.0.get_mut(key as usize).ok_or(())? = value;
            Ok(())
        }
    }

    #[test]
    fn rate_table() {
        assert_eq!(DataRate::new(0).baud(), 4800);
        assert_eq!(DataRate::new(3).baud(), 19200);
        assert_eq!(DataRate::new(7).baud(), 115_200);
        assert_eq!(DataRate::new(0xff), DataRate::MAX);
    }

    #[test]
    fn load_clamps_erased_cell() {
        let mut eeprom = Eeprom([0xff; 16]);

        let config = Config::load(&mut eeprom).unwrap();
        assert_eq!(config.data_rate.index(), 7);
        assert!(config.statistics);
    }

    #[test]
    fn save_then_load() {
        let mut eeprom = Eeprom([0; 16]);

        DataRate::new(5).save(&mut eeprom).unwrap();
        assert_eq!(eeprom.0[DATA_RATE_KEY as usize], 5);
        assert_eq!(DataRate::load(&mut eeprom), Ok(DataRate::new(5)));
    }

    #[test]
    fn store_errors_propagate() {
        struct Broken;

        impl ConfigStore for Broken {
            type Error = &'static str;

            fn read_byte(&mut self, _key: u16) -> Result<u8, Self::Error> {
                Err("bus fault")
            }

            fn write_byte(&mut self, _key: u16, _value: u8) -> Result<(), Self::Error> {
                Err("bus fault")
            }
        }

        assert_eq!(Config::load(&mut Broken), Err("bus fault"));
    }
}
