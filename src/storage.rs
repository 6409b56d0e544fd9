//! In-process artifact storage
//!
//! The data endpoints use whole-collection load/replace semantics: a save
//! replaces the collection, a load returns all of it. Persistence beyond the
//! process lifetime is out of scope; a database-backed store would slot in
//! behind the same methods.

use std::sync::RwLock;

use crate::models::{ApiCollection, Bug, TestCase, TestPlan, UserStory};

/// In-process store for QA artifacts
///
/// # Thread Safety
///
/// One RwLock per collection, so saving test cases never blocks reading
/// bugs.
#[derive(Debug, Default)]
pub struct Storage {
    test_cases: RwLock<Vec<TestCase>>,
    user_stories: RwLock<Vec<UserStory>>,
    bugs: RwLock<Vec<Bug>>,
    test_plans: RwLock<Vec<TestPlan>>,
    api_collections: RwLock<Vec<ApiCollection>>,
}

impl Storage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_cases(&self) -> Vec<TestCase> {
        self.test_cases.read().unwrap().clone()
    }

    pub fn replace_test_cases(&self, cases: Vec<TestCase>) {
        *self.test_cases.write().unwrap() = cases;
    }

    pub fn user_stories(&self) -> Vec<UserStory> {
        self.user_stories.read().unwrap().clone()
    }

    pub fn replace_user_stories(&self, stories: Vec<UserStory>) {
        *self.user_stories.write().unwrap() = stories;
    }

    pub fn bugs(&self) -> Vec<Bug> {
        self.bugs.read().unwrap().clone()
    }

    pub fn replace_bugs(&self, bugs: Vec<Bug>) {
        *self.bugs.write().unwrap() = bugs;
    }

    pub fn test_plans(&self) -> Vec<TestPlan> {
        self.test_plans.read().unwrap().clone()
    }

    pub fn replace_test_plans(&self, plans: Vec<TestPlan>) {
        *self.test_plans.write().unwrap() = plans;
    }

    pub fn api_collections(&self) -> Vec<ApiCollection> {
        self.api_collections.read().unwrap().clone()
    }

    pub fn replace_api_collections(&self, collections: Vec<ApiCollection>) {
        *self.api_collections.write().unwrap() = collections;
    }
}
