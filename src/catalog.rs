use serde::{Deserialize, Serialize};

use crate::results::ResultStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Error,
}

impl From<ResultStatus> for TestStatus {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Passed => TestStatus::Passed,
            ResultStatus::Failed => TestStatus::Failed,
            ResultStatus::Error => TestStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub status: TestStatus,
}

/// The statically declared set of runnable tests and their last status.
pub struct TestCatalog {
    tests: Vec<TestCase>,
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new(vec![TestCase {
            id: 1,
            name: "HomepageLoadsDotNet".to_string(),
            description: "Verifies that the homepage loads correctly".to_string(),
            status: TestStatus::Pending,
        }])
    }
}

impl TestCatalog {
    pub fn new(tests: Vec<TestCase>) -> Self {
        Self { tests }
    }

    pub fn all(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn get(&self, id: u32) -> Option<&TestCase> {
        self.tests.iter().find(|t| t.id == id)
    }

    pub fn set_status(&mut self, id: u32, status: TestStatus) -> bool {
        match self.tests.iter_mut().find(|t| t.id == id) {
            Some(test) => {
                test.status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = TestCatalog::default();
        assert_eq!(catalog.all().len(), 1);
        let test = catalog.get(1).unwrap();
        assert_eq!(test.name, "HomepageLoadsDotNet");
        assert_eq!(test.status, TestStatus::Pending);
    }

    #[test]
    fn test_set_status_unknown_id() {
        let mut catalog = TestCatalog::default();
        assert!(!catalog.set_status(42, TestStatus::Running));
        assert!(catalog.set_status(1, TestStatus::Running));
        assert_eq!(catalog.get(1).unwrap().status, TestStatus::Running);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TestStatus::Passed).unwrap(),
            "\"passed\""
        );
        let parsed: TestStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, TestStatus::Error);
    }
}
