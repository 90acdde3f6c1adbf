use chrono::Utc;
use rand::Rng;

/// 生成流水唯一引用号: 前缀 + 毫秒时间戳 + 6位随机后缀。
/// 引用号是请求级别的, 不依赖任何进程内计数器。
pub fn generate_reference_token(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| {
            let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
            chars[rng.gen_range(0..chars.len())] as char
        })
        .collect();

    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// 兑换流水引用号, 由兑换记录ID派生, 天然唯一
pub fn redemption_reference(redemption_id: i64) -> String {
    format!("RDM-{}", redemption_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reference_token_shape() {
        let token = generate_reference_token("PTS");
        let parts: Vec<&str> = token.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "PTS");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_distinct() {
        // 同一毫秒内生成也应因随机后缀而不同
        let a = generate_reference_token("PTS");
        let b = generate_reference_token("PTS");
        assert_ne!(a, b);
    }

    #[test]
    fn test_redemption_reference() {
        assert_eq!(redemption_reference(17), "RDM-17");
    }
}
