use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

#[cfg(test)]
use mockall::automock;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::{Classroom, Student},
};

/// Read-only lookups against the account/classroom data owned by the rest
/// of the school-management system. Used to attribute submissions and to
/// label analytics output.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn find_student(&self, id: &str) -> AppResult<Option<Student>>;
    async fn find_students(&self, ids: &[String]) -> AppResult<Vec<Student>>;
    async fn find_classrooms(&self, ids: &[String]) -> AppResult<Vec<Classroom>>;
}

pub struct MongoRosterRepository {
    students: Collection<Student>,
    classrooms: Collection<Classroom>,
}

impl MongoRosterRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let students = db.get_collection(&config.students_collection);
        let classrooms = db.get_collection(&config.classrooms_collection);
        Self {
            students,
            classrooms,
        }
    }
}

#[async_trait]
impl RosterRepository for MongoRosterRepository {
    async fn find_student(&self, id: &str) -> AppResult<Option<Student>> {
        let student = self.students.find_one(doc! { "id": id }).await?;
        Ok(student)
    }

    async fn find_students(&self, ids: &[String]) -> AppResult<Vec<Student>> {
        let students = self
            .students
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(students)
    }

    async fn find_classrooms(&self, ids: &[String]) -> AppResult<Vec<Classroom>> {
        let classrooms = self
            .classrooms
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(classrooms)
    }
}
