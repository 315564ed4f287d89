//! 文件魔术字节校验
//!
//! 上传代理到媒体托管之前，先用首块数据校验内容与扩展名是否一致。

/// 校验数据前缀是否与扩展名匹配
///
/// 对不认识的扩展名返回 false（扩展名白名单在配置层，不在这里）。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    match extension {
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP",
        // ISO-BMFF: 偏移 4 处是 "ftyp"
        ".mp4" | ".m4v" | ".mov" => data.len() >= 8 && &data[4..8] == b"ftyp",
        ".webm" | ".mkv" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_magic() {
        assert!(validate_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0], ".jpg"));
        assert!(!validate_magic_bytes(&[0x00, 0x01], ".jpg"));
    }

    #[test]
    fn test_png_magic() {
        assert!(validate_magic_bytes(
            &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00],
            ".png"
        ));
        assert!(!validate_magic_bytes(b"GIF89a...", ".png"));
    }

    #[test]
    fn test_mp4_magic() {
        let mut data = vec![0x00, 0x00, 0x00, 0x20];
        data.extend_from_slice(b"ftypisom");
        assert!(validate_magic_bytes(&data, ".mp4"));
        assert!(!validate_magic_bytes(b"RIFF....WEBP", ".mp4"));
    }

    #[test]
    fn test_unknown_extension() {
        assert!(!validate_magic_bytes(&[0xFF, 0xD8, 0xFF], ".exe"));
    }
}
