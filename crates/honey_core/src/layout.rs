use std::io;

/// Where the honey counter lives in a `.BMGSave` file: four big-endian
/// bytes at a fixed offset. Every other byte of the file is opaque.
pub const HONEY_FIELD: FieldLayout = FieldLayout {
    offset: 0xD008,
    width: 4,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub offset: usize,
    pub width: usize,
}

impl FieldLayout {
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Largest value representable in `width` bytes unsigned.
    pub fn max_value(&self) -> u32 {
        if self.width >= 4 {
            u32::MAX
        } else {
            (1u32 << (8 * self.width as u32)) - 1
        }
    }

    pub fn validate(&self) -> io::Result<()> {
        if self.width == 0 || self.width > 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid field width {}, expected 1-4 bytes", self.width),
            ));
        }
        Ok(())
    }

    /// A field edit never resizes the file, so the whole field must already
    /// sit inside it.
    pub fn check_fits(&self, file_len: usize) -> io::Result<()> {
        self.validate()?;
        if self.end() > file_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "file is {file_len} bytes, need at least {} for field at offset 0x{:X}",
                    self.end(),
                    self.offset
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn honey_field_ends_inside_a_full_save() {
        assert_eq!(HONEY_FIELD.end(), 0xD00C);
        assert!(HONEY_FIELD.check_fits(0xD00C).is_ok());
        assert!(HONEY_FIELD.check_fits(53260).is_ok());
    }

    #[test]
    fn check_fits_rejects_short_file() {
        let err = HONEY_FIELD.check_fits(0xD000).expect_err("expected failure");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn max_value_by_width() {
        assert_eq!(FieldLayout { offset: 0, width: 1 }.max_value(), 0xFF);
        assert_eq!(FieldLayout { offset: 0, width: 2 }.max_value(), 0xFFFF);
        assert_eq!(FieldLayout { offset: 0, width: 4 }.max_value(), u32::MAX);
    }

    #[test]
    fn validate_rejects_zero_and_oversized_width() {
        assert!(FieldLayout { offset: 0, width: 0 }.validate().is_err());
        assert!(FieldLayout { offset: 0, width: 5 }.validate().is_err());
    }
}
