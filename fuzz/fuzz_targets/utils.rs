/// A `Signature` attribute is one `CONSTANT_Utf8` entry, so it never exceeds `u16::MAX` bytes.
pub const MAX_SIGNATURE_LEN: usize = u16::MAX as usize;

/// The fuzz input as signature text, cut to `MAX_SIGNATURE_LEN` bytes.
///
/// A code point split by the cut is dropped. Input that is not UTF-8 before the
/// cut returns `None`.
pub fn signature_text(data: &[u8]) -> Option<&str> {
    let capped = &data[..data.len().min(MAX_SIGNATURE_LEN)];
    match std::str::from_utf8(capped) {
        Ok(text) => Some(text),
        Err(err) if err.error_len().is_none() => {
            std::str::from_utf8(&capped[..err.valid_up_to()]).ok()
        }
        Err(_) => None,
    }
}
