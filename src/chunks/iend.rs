use super::crc::chunk_crc;

pub(crate) const HEADER: &[u8; 4] = b"IEND";

pub(crate) fn write_end() -> [u8; 12] {
    let mut data = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0, 0, 0, 0];
    let crc = chunk_crc(HEADER, &[]).to_be_bytes();
    data[8..].copy_from_slice(&crc);
    data
}
