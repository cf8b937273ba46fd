// units.rs - Host string boundary: the code-unit view a text adapter needs.
//
// The adapter only requires a fixed-width UTF-16 code-unit view of the host
// string, a bounded copy primitive, and index arithmetic between the unit
// space and the host's own index space. Each host representation implements
// this once; everything above works through the trait.

/// A host string exposed as a sequence of UTF-16 code units.
///
/// Native positions are unit offsets in `0..=unit_len()`. Host positions
/// are whatever the representation itself indexes by: byte offsets for
/// `&str`, unit offsets for `&[u16]`.
pub trait CodeUnits {
    /// Total number of UTF-16 code units.
    fn unit_len(&self) -> usize;

    /// Copy code units starting at unit offset `from` into `dest`.
    ///
    /// Copies `min(dest.len(), unit_len() - from)` units and returns the
    /// count. A `from` at or past the end copies nothing.
    fn copy_units(&self, from: usize, dest: &mut [u16]) -> usize;

    /// Translate a native unit offset into the host's index space.
    ///
    /// A `native` offset landing on the trail unit of a surrogate pair maps
    /// to the host position of the character containing it.
    fn host_position(&self, native: usize) -> usize;

    /// Translate a host position into a native unit offset.
    ///
    /// `host` should lie on a character boundary of the representation.
    fn native_position(&self, host: usize) -> usize;
}

impl CodeUnits for &[u16] {
    fn unit_len(&self) -> usize {
        self.len()
    }

    fn copy_units(&self, from: usize, dest: &mut [u16]) -> usize {
        if from >= self.len() {
            return 0;
        }
        let n = dest.len().min(self.len() - from);
        dest[..n].copy_from_slice(&self[from..from + n]);
        n
    }

    fn host_position(&self, native: usize) -> usize {
        native.min(self.len())
    }

    fn native_position(&self, host: usize) -> usize {
        host.min(self.len())
    }
}

// Lazily bridged representation: units are computed on demand from the
// UTF-8 bytes, never materialized as a whole.
impl CodeUnits for &str {
    fn unit_len(&self) -> usize {
        self.chars().map(char::len_utf16).sum()
    }

    fn copy_units(&self, from: usize, dest: &mut [u16]) -> usize {
        let mut written = 0;
        let mut pos = 0;
        for c in self.chars() {
            if written == dest.len() {
                break;
            }
            let mut units = [0u16; 2];
            for &u in c.encode_utf16(&mut units).iter() {
                if pos >= from && written < dest.len() {
                    dest[written] = u;
                    written += 1;
                }
                pos += 1;
            }
        }
        written
    }

    fn host_position(&self, native: usize) -> usize {
        let mut units = 0;
        for (byte, c) in self.char_indices() {
            let width = c.len_utf16();
            if units + width > native {
                return byte;
            }
            units += width;
        }
        self.len()
    }

    fn native_position(&self, host: usize) -> usize {
        let mut units = 0;
        for (byte, c) in self.char_indices() {
            if byte >= host {
                return units;
            }
            units += c.len_utf16();
        }
        units
    }
}
