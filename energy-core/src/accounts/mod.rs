use std::collections::HashMap;

/// Account-to-plan association, consumed only by the cost-summary path.
///
/// Kept behind a trait so the service can swap in a real account system
/// without touching the pricing code.
pub trait PlanAccounts: Send + Sync {
    /// The plan currently assigned to a meter, if any.
    fn plan_id_for_meter(&self, smart_meter_id: &str) -> Option<String>;
}

/// Static associations loaded once at startup.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    assignments: HashMap<String, String>,
}

impl InMemoryAccounts {
    pub fn new<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            assignments: assignments.into_iter().collect(),
        }
    }
}

impl PlanAccounts for InMemoryAccounts {
    fn plan_id_for_meter(&self, smart_meter_id: &str) -> Option<String> {
        self.assignments.get(smart_meter_id).cloned()
    }
}
