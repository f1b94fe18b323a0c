use super::*;

#[test]
fn encode_prefixes_mime_and_base64() {
    assert_eq!(encode("image/png", b"hi"), "data:image/png;base64,aGk=");
}

#[test]
fn encode_falls_back_for_blank_mime() {
    assert_eq!(encode("  ", b""), "data:application/octet-stream;base64,");
}

#[test]
fn mime_from_name_is_case_insensitive() {
    assert_eq!(mime_from_name("me.PNG"), "image/png");
    assert_eq!(mime_from_name("photo.jpeg"), "image/jpeg");
    assert_eq!(mime_from_name("archive.tar.gz"), FALLBACK_MIME);
    assert_eq!(mime_from_name("noext"), FALLBACK_MIME);
}

#[tokio::test]
async fn in_memory_file_reads_as_data_url() {
    let file = InMemoryFile::new("avatar.gif", vec![0x47, 0x49, 0x46]);
    assert_eq!(file.name(), "avatar.gif");
    assert_eq!(file.read_as_data_url().await, Ok("data:image/gif;base64,R0lG".to_owned()));
}
