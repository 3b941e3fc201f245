//! 구문 분류기
//!
//! 원시 SQL 문자열이 프라이머리를 필요로 하는지 판정합니다.
//! 판정이 애매하면 항상 쓰기로 분류합니다.

/// 읽기 전용으로 인정되는 구문 접두어
const READ_PREFIX: &str = "select";

/// 잠금 읽기 절 (프라이머리에서 직렬화되어야 함)
const LOCKING_CLAUSES: [&str; 2] = ["for update", "for share"];

/// 구문 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// 쓰기, DDL, 잠금 읽기, 알 수 없는 구문
    Mutating,
    /// 잠금 없는 SELECT
    ReadOnly,
}

impl StatementKind {
    /// 쓰기 구문 여부
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Mutating)
    }
}

/// 구문 분류
pub fn classify(sql: &str) -> StatementKind {
    let normalized = sql.trim().to_lowercase();

    let is_select =
        normalized.chars().count() > READ_PREFIX.len() + 1 && normalized.starts_with(READ_PREFIX);
    if !is_select {
        return StatementKind::Mutating;
    }

    // 접두어가 ASCII이므로 바이트 경계가 보장됨
    let rest = &normalized[READ_PREFIX.len()..];
    if LOCKING_CLAUSES.iter().any(|clause| rest.contains(clause)) {
        return StatementKind::Mutating;
    }

    StatementKind::ReadOnly
}

/// 구문이 프라이머리로 가야 하는지 확인
///
/// 전체 함수이며 에러가 없습니다. 빈 문자열이나 알 수 없는 텍스트는 `true`입니다.
pub fn is_mutating(sql: &str) -> bool {
    classify(sql).is_mutating()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_statements() {
        assert!(is_mutating("CREATE TABLE users()"));
        assert!(!is_mutating("SELECT COUNT(1) FROM users"));
        assert!(is_mutating("INSERT INTO users VALUES()"));
        assert!(is_mutating(r#"UPDATE users SET email="abcd@gmail.com""#));
        assert!(is_mutating("DELETE FROM users"));
    }

    #[test]
    fn test_locking_reads_are_mutating() {
        assert!(is_mutating("SELECT * FROM t FOR UPDATE"));
        assert!(is_mutating("SELECT * FROM FOR SHARE"));
        assert!(is_mutating("select id from jobs where state = 'new' for update skip locked"));
    }

    #[test]
    fn test_unknown_statements_default_to_mutating() {
        assert!(is_mutating("FOOBAR"));
        assert!(is_mutating(""));
        assert!(is_mutating("   "));
        assert!(is_mutating("abc"));
    }

    #[test]
    fn test_select_length_boundary() {
        // "select" + 1자는 7자로 경계 이하
        assert!(is_mutating("select"));
        assert!(is_mutating("select1"));
        assert!(!is_mutating("select 1"));
    }

    #[test]
    fn test_normalization() {
        assert!(!is_mutating("   SeLeCt name FROM users  \n"));
        assert_eq!(classify("\tSELECT 1 + 1"), StatementKind::ReadOnly);
        assert_eq!(classify("WITH x AS (SELECT 1) SELECT * FROM x"), StatementKind::Mutating);
    }

    #[test]
    fn test_non_ascii_text() {
        assert!(!is_mutating("SELECT '한글' FROM users"));
        assert!(is_mutating("선택 * FROM users"));
    }
}
