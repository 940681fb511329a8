use super::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// A single fixed-schema row.
///
/// The codec below is total in both directions for pre-validated data:
/// field-size checks (`id > 0`, byte-length bounds) belong to the statement
/// parser, never here. Round-trips are exact for any value within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Encode into a row slot of exactly `ROW_SIZE` bytes: id little-endian
    /// at the front, each string left-justified and NUL-padded to its fixed
    /// width.
    pub fn write_to(&self, slot: &mut [u8]) {
        debug_assert_eq!(slot.len(), ROW_SIZE);
        slot[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_padded(
            &mut slot[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            self.username.as_bytes(),
        );
        write_padded(
            &mut slot[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE],
            self.email.as_bytes(),
        );
    }

    /// Decode from a row slot, trimming each string at its first NUL byte.
    pub fn read_from(slot: &[u8]) -> Self {
        debug_assert_eq!(slot.len(), ROW_SIZE);
        let id = u32::from_le_bytes([slot[0], slot[1], slot[2], slot[3]]);
        let username = read_trimmed(&slot[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        let email = read_trimmed(&slot[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
        Self {
            id,
            username,
            email,
        }
    }
}

fn write_padded(field: &mut [u8], bytes: &[u8]) {
    field[..bytes.len()].copy_from_slice(bytes);
    field[bytes.len()..].fill(0);
}

fn read_trimmed(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
