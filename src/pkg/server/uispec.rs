use askama::Template;

use crate::pkg::internal::adaptors::applications::spec::ApplicationDetails;
use crate::pkg::internal::adaptors::dashboard::spec::{AdminDashboard, StudentDashboard};
use crate::pkg::internal::adaptors::jobs::spec::JobEntry;
use crate::pkg::internal::adaptors::users::spec::UserEntry;

#[derive(Template)]
#[template(path = "home_admin.html")]
pub struct AdminHome<'a> {
    pub user: &'a UserEntry,
    pub metrics: AdminDashboard,
    pub pending: Vec<ApplicationDetails>,
}

#[derive(Template)]
#[template(path = "home_student.html")]
pub struct StudentHome<'a> {
    pub user: &'a UserEntry,
    pub metrics: StudentDashboard,
    pub jobs: Vec<JobEntry>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct Login<'a> {
    pub error: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_template_renders_error_banner() {
        let page = Login { error: None }.render().unwrap();
        assert!(page.contains("Sign in"));
        assert!(!page.contains("alert"));

        let page = Login {
            error: Some("Invalid username or password"),
        }
        .render()
        .unwrap();
        assert!(page.contains("Invalid username or password"));
    }
}
