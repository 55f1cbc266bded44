use itertools::Itertools;

/// Who got the role and who did not, each in the order the targets were given.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Outcomes {
    pub success: Vec<String>,
    pub failed: Vec<String>,
}

impl Outcomes {
    pub fn render(&self, role_name: &str) -> String {
        let mut lines = Vec::with_capacity(2);
        if !self.success.is_empty() {
            lines.push(format!(
                "✅ {} added to: {}",
                role_name,
                self.success.iter().join(", ")
            ));
        }
        if !self.failed.is_empty() {
            lines.push(format!(
                "❌ Failed to add {} to: {}",
                role_name,
                self.failed.iter().join(", ")
            ));
        }
        lines.join("\n")
    }
}
