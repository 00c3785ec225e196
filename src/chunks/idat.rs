use super::crc::chunk_crc;

pub(crate) const HEADER: &[u8; 4] = b"IDAT";

#[derive(Debug)]
pub(crate) struct IDATChunk<'a> {
    pub(crate) data: &'a [u8],
}
impl IDATChunk<'_> {
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = (self.data.len() as u32).to_be_bytes().to_vec();
        bytes.extend(HEADER);
        bytes.extend(self.data);
        bytes.extend(chunk_crc(HEADER, self.data).to_be_bytes());
        bytes
    }
}
