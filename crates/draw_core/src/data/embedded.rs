//! 임베딩된 팀 카탈로그
//!
//! `include_str!` 매크로로 컴파일 시점에 `data/teams.json`을 바이너리에 포함합니다.
//! 런타임에 파일 I/O 없이 즉시 사용 가능합니다.

use super::catalog::TeamCatalog;
use std::sync::OnceLock;

/// 2026 월드컵 포트 구성 JSON
pub const TEAMS_JSON: &str = include_str!("../../../../data/teams.json");

static WORLD_CUP_CATALOG: OnceLock<TeamCatalog> = OnceLock::new();

/// 2026 월드컵 카탈로그 반환
///
/// 첫 호출 시 JSON 파싱, 이후 캐시된 데이터 반환
pub fn world_cup_catalog() -> &'static TeamCatalog {
    WORLD_CUP_CATALOG.get_or_init(|| {
        TeamCatalog::from_json(TEAMS_JSON).expect("Embedded teams JSON is corrupted")
    })
}
