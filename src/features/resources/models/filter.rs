use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Resource, ResourceType};
use crate::core::database::escape_like;

/// Catalog filters. Every set field narrows the result (logical AND).
///
/// `q` matches title or subject code, case-insensitively, as a substring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub branch: Option<String>,
    pub semester: Option<i32>,
    pub resource_type: Option<ResourceType>,
    pub q: Option<String>,
    pub folder_id: Option<Uuid>,
}

impl ResourceFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// In-memory form of the predicate that `push_conditions` renders as SQL
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(branch) = &self.branch {
            if &resource.branch != branch {
                return false;
            }
        }
        if let Some(semester) = self.semester {
            if resource.semester != semester {
                return false;
            }
        }
        if let Some(resource_type) = self.resource_type {
            if !resource
                .resource_type
                .eq_ignore_ascii_case(resource_type.as_str())
            {
                return false;
            }
        }
        if let Some(folder_id) = self.folder_id {
            if resource.folder_id != Some(folder_id) {
                return false;
            }
        }
        if let Some(q) = &self.q {
            let needle = q.to_lowercase();
            if !resource.title.to_lowercase().contains(&needle)
                && !resource.subject_code.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Append ` WHERE ...` for this filter to a `SELECT ... FROM resources` query
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE TRUE");

        if let Some(branch) = &self.branch {
            qb.push(" AND branch = ").push_bind(branch.clone());
        }
        if let Some(semester) = self.semester {
            qb.push(" AND semester = ").push_bind(semester);
        }
        if let Some(resource_type) = self.resource_type {
            qb.push(" AND type = ").push_bind(resource_type.as_str());
        }
        if let Some(folder_id) = self.folder_id {
            qb.push(" AND folder_id = ").push_bind(folder_id);
        }
        if let Some(q) = &self.q {
            let pattern = format!("%{}%", escape_like(q));
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR subject_code ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}
