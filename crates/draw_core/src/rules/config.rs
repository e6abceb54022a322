//! Draw rule parameters
//!
//! 규칙 종류는 고정이고, 숫자와 개최국 슬롯만 설정으로 바꿀 수 있다.

use crate::models::Confederation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed first-slot reservation: `team` must open group `group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSlot {
    /// Team code (e.g. "MEX")
    pub team: String,
    /// 0-based group index (0 = A)
    pub group: usize,
}

impl HostSlot {
    pub fn new(team: impl Into<String>, group: usize) -> Self {
        Self { team: team.into(), group }
    }
}

/// Draw rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    /// 조 개수 (기본: 12)
    pub group_count: usize,
    /// 조당 팀 수 = 포트 수 (기본: 4)
    pub group_size: usize,
    /// 한 조에 여러 팀이 허용되는 연맹 (기본: UEFA)
    pub flexible_confederation: Confederation,
    /// 한 조에 들어갈 수 있는 flexible 연맹 팀 최대 수 (기본: 2)
    pub max_flexible_per_group: usize,
    /// flexible 연맹 팀이 최대치로 들어간 조의 최대 개수 (기본: 4)
    pub max_doubled_groups: usize,
    /// 개최국 고정 슬롯
    pub hosts: Vec<HostSlot>,
    /// 탐색 1회당 배치 시도 한도 (기본: 1000)
    pub max_attempts: usize,
    /// 재셔플 재시도 횟수 (기본: 5)
    pub completion_retries: u32,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            group_count: 12,
            group_size: 4,
            flexible_confederation: Confederation::Uefa,
            max_flexible_per_group: 2,
            max_doubled_groups: 4,
            hosts: vec![HostSlot::new("MEX", 0), HostSlot::new("CAN", 1), HostSlot::new("USA", 2)],
            max_attempts: 1000,
            completion_retries: 5,
        }
    }
}

impl DrawRules {
    /// 2026 World Cup draw (default)
    pub fn world_cup_2026() -> Self {
        Self::default()
    }

    /// Same limits, no reserved host slots.
    pub fn without_hosts() -> Self {
        Self { hosts: Vec::new(), ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn total_slots(&self) -> usize {
        self.group_count * self.group_size
    }

    /// Group reserved for `code`, if it is a host.
    pub fn host_group_of(&self, code: &str) -> Option<usize> {
        self.hosts.iter().find(|h| h.team == code).map(|h| h.group)
    }

    /// Host code that must open `group`, if any.
    pub fn host_of_group(&self, group: usize) -> Option<&str> {
        self.hosts.iter().find(|h| h.group == group).map(|h| h.team.as_str())
    }

    pub fn is_host(&self, code: &str) -> bool {
        self.host_group_of(code).is_some()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.group_count == 0 || self.group_count > 26 {
            return Err(format!("group_count must be 1..=26, got {}", self.group_count));
        }
        if self.group_size == 0 {
            return Err("group_size must be at least 1".to_string());
        }
        if self.max_flexible_per_group == 0 {
            return Err("max_flexible_per_group must be at least 1".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.completion_retries == 0 {
            return Err("completion_retries must be at least 1".to_string());
        }

        let mut teams = HashSet::new();
        let mut groups = HashSet::new();
        for host in &self.hosts {
            if host.group >= self.group_count {
                return Err(format!(
                    "host {} targets group index {} (only {} groups)",
                    host.team, host.group, self.group_count
                ));
            }
            if !teams.insert(host.team.as_str()) {
                return Err(format!("host {} is listed twice", host.team));
            }
            if !groups.insert(host.group) {
                return Err(format!("two hosts share group index {}", host.group));
            }
        }
        Ok(())
    }
}
