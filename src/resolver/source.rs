//! 데이터 소스 어댑터
//!
//! 라우터가 소비하는 데이터 접근 계층의 기능 인터페이스입니다.
//! 라우터는 핸들의 내부를 들여다보지 않고 선택된 핸들에 호출을 넘길 뿐입니다.

use super::types::Value;

/// 데이터 소스 (프라이머리 또는 레플리카 연결 핸들)
///
/// 연결 생성, 풀링, 실행은 모두 구현체의 책임입니다.
/// 실행 실패는 `Output`에 담겨 그대로 호출자에게 전달됩니다.
pub trait DataSource: Send + Sync {
    /// 호출 결과 타입
    type Output;
    /// 저장 대상 모델 타입
    type Model: ?Sized;

    /// 원시 구문 실행
    fn execute(&self, sql: &str, params: &[Value]) -> Self::Output;

    /// 원시 조회
    fn query_raw(&self, sql: &str, params: &[Value]) -> Self::Output;

    /// 조건 절 (SQL `WHERE`)
    fn filter(&self, condition: &str, params: &[Value]) -> Self::Output;

    /// 조건에 맞는 모든 행
    fn find(&self, condition: &str, params: &[Value]) -> Self::Output;

    /// 기본 키 순서상 첫 행
    fn first(&self, condition: &str, params: &[Value]) -> Self::Output;

    /// 기본 키 순서상 마지막 행
    fn last(&self, condition: &str, params: &[Value]) -> Self::Output;

    /// 순서 없이 한 행
    fn take(&self, condition: &str, params: &[Value]) -> Self::Output;

    /// 행 개수
    fn count(&self, condition: &str, params: &[Value]) -> Self::Output;

    /// 모델 저장
    fn save(&self, model: &Self::Model) -> Self::Output;
}
