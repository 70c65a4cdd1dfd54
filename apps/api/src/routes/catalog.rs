//! Static portfolio data: featured projects and the skills overview.

use axum::{extract::Path, response::Redirect, Json};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub github: &'static str,
    pub live: Option<&'static str>,
    pub image: &'static str,
    pub featured: bool,
}

const PROJECT_IMAGE: &str = "/api/placeholder/400/250";

pub const PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "FinOps Analytics Platform",
        description: "Advanced financial operations analytics platform built with Python, Streamlit, and Snowflake for real-time cost optimization and budget tracking.",
        technologies: &["Python", "Streamlit", "Snowflake", "Docker", "Kubernetes"],
        github: "https://github.com/charles-smith/na-finops",
        live: None,
        image: PROJECT_IMAGE,
        featured: true,
    },
    Project {
        id: 2,
        title: "Data Pipeline Automation",
        description: "Automated data processing pipeline using Apache Airflow for ETL operations with comprehensive monitoring and alerting.",
        technologies: &["Apache Airflow", "Python", "Docker", "PostgreSQL"],
        github: "https://github.com/charles-smith/airflow-community",
        live: None,
        image: PROJECT_IMAGE,
        featured: true,
    },
    Project {
        id: 3,
        title: "Oracle BICC Integration",
        description: "Enterprise data integration solution for Oracle Business Intelligence Cloud Connector with automated schema management.",
        technologies: &["Python", "Oracle", "Spark", "Docker"],
        github: "https://github.com/charles-smith/gbi-oracle-bicc",
        live: None,
        image: PROJECT_IMAGE,
        featured: false,
    },
];

/// GET /api/projects
pub async fn handle_projects() -> Json<&'static [Project]> {
    Json(PROJECTS)
}

/// GET /api/skills
pub async fn handle_skills() -> Json<Value> {
    Json(json!({
        "Programming Languages": ["Python", "JavaScript", "TypeScript", "SQL", "Bash"],
        "Frontend": ["React", "Next.js", "Tailwind CSS", "HTML5", "CSS3"],
        "Backend": ["Node.js", "Express", "FastAPI", "Flask"],
        "Databases": ["PostgreSQL", "Snowflake", "Oracle", "MongoDB"],
        "Cloud & DevOps": ["Docker", "Kubernetes", "AWS", "Terraform", "Airflow"],
        "Data & Analytics": ["Pandas", "NumPy", "Streamlit", "DBT", "Apache Spark"]
    }))
}

/// GET /api/placeholder/:width/:height
pub async fn handle_placeholder(Path((width, height)): Path<(u32, u32)>) -> Redirect {
    Redirect::temporary(&format!(
        "https://via.placeholder.com/{width}x{height}/4f46e5/ffffff?text=Project+Image"
    ))
}
