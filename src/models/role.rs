use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Supervisor,
    Worker,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Worker => "worker",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "supervisor" => Some(Role::Supervisor),
            "worker" => Some(Role::Worker),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (any case, short forms allowed)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "a" | "admin" => Some(Role::Admin),
            "s" | "supervisor" => Some(Role::Supervisor),
            "w" | "worker" => Some(Role::Worker),
            _ => None,
        }
    }

    /// Roles allowed to file incident reports and correct attendance.
    pub fn can_supervise(&self) -> bool {
        matches!(self, Role::Admin | Role::Supervisor)
    }
}
