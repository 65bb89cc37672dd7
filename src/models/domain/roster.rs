use serde::{Deserialize, Serialize};

/// Read-only collaborator data owned by the account-management side of the
/// system. The grading engine only ever looks these up, never writes them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub grade_level: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Classroom {
    pub id: String,
    pub grade_level: String,
    pub class_section: String,
    pub subject_name: String,
}

impl Classroom {
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.grade_level, self.class_section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_full_name_joins_names() {
        let student = Student {
            id: "student-1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            grade_level: "Grade 4".to_string(),
        };

        assert_eq!(student.full_name(), "Ana Reyes");
    }

    #[test]
    fn classroom_display_name_combines_grade_and_section() {
        let classroom = Classroom {
            id: "classroom-1".to_string(),
            grade_level: "Grade 4".to_string(),
            class_section: "Sampaguita".to_string(),
            subject_name: "Science".to_string(),
        };

        assert_eq!(classroom.display_name(), "Grade 4 - Sampaguita");
    }
}
