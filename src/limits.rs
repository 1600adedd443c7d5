/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Limits are checked after header
/// parsing and before the output buffer is allocated, so an oversized
/// declared dimension never triggers an allocation.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for output buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a decode's declared geometry and output allocation in one pass.
    pub(crate) fn check_decode(
        &self,
        width: u32,
        height: u32,
        output_bytes: usize,
    ) -> Result<(), crate::CodecError> {
        let pixels = u64::from(width) * u64::from(height);
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("output size", output_bytes as u64, self.max_memory_bytes),
        ];
        for (what, value, limit) in checks {
            if let Some(limit) = limit {
                if value > limit {
                    return Err(crate::CodecError::LimitExceeded(alloc::format!(
                        "{what} {value} exceeds limit {limit}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_by_default() {
        assert!(Limits::default()
            .check_decode(u32::MAX, u32::MAX, usize::MAX)
            .is_ok());
    }

    #[test]
    fn each_bound_is_enforced() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(10),
            max_pixels: Some(50),
            max_memory_bytes: Some(100),
        };
        assert!(limits.check_decode(10, 5, 100).is_ok());
        assert!(limits.check_decode(11, 1, 1).is_err());
        assert!(limits.check_decode(1, 11, 1).is_err());
        assert!(limits.check_decode(10, 10, 1).is_err());
        assert!(limits.check_decode(5, 5, 101).is_err());
    }
}
