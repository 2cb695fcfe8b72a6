use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::batch::{BatchEntry, BatchEntryError, BatchSummary};
use crate::dto::participant::{CreateParticipantRequest, UpdateParticipantRequest};
use crate::repository::participant::ParticipantRepository;

/// Domain for emails derived from entries that arrive without one.
const SYNTHETIC_EMAIL_DOMAIN: &str = "participants.local";

/// Parse pasted batch text into raw entries.
///
/// One entry per line in the admin sheet format `Name, Badges, Posts`, with
/// fields separated by comma or tab. Blank lines and lines with fewer than
/// three fields are dropped here; everything that survives gets exactly one
/// outcome from [`reconcile`].
pub fn parse_batch_text(text: &str) -> Vec<BatchEntry> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split([',', '\t']).map(str::trim).collect();
            if line.trim().is_empty() || fields.len() < 3 {
                return None;
            }

            Some(BatchEntry {
                name: Some(fields[0].to_string()).filter(|n| !n.is_empty()),
                email: None,
                badges: fields[1].parse().unwrap_or(0),
                posts: fields[2].parse().unwrap_or(0),
                google_dev_profile_url: None,
                google_skills_profile_url: None,
            })
        })
        .collect()
}

/// Derive a deterministic placeholder email from a participant name, so that
/// re-importing the same sheet updates instead of duplicating.
pub fn derive_email(name: &str) -> String {
    format!("{}@{}", slugify(name), SYNTHETIC_EMAIL_DOMAIN)
}

fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-");

    if slug.is_empty() {
        "participant".to_string()
    } else {
        slug
    }
}

#[derive(Debug)]
struct ValidEntry {
    name: String,
    email: String,
    badges: i32,
    posts: i32,
    google_dev_profile_url: Option<String>,
    google_skills_profile_url: Option<String>,
}

impl ValidEntry {
    fn create_request(&self) -> CreateParticipantRequest {
        CreateParticipantRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            badges: self.badges,
            posts: self.posts,
            google_dev_profile_url: self.google_dev_profile_url.clone(),
            google_skills_profile_url: self.google_skills_profile_url.clone(),
        }
    }

    fn update_request(&self) -> UpdateParticipantRequest {
        UpdateParticipantRequest {
            name: Some(self.name.clone()),
            email: None,
            badges: Some(self.badges),
            posts: Some(self.posts),
            google_dev_profile_url: self.google_dev_profile_url.clone(),
            google_skills_profile_url: self.google_skills_profile_url.clone(),
        }
    }
}

/// What reconciliation will do with one validated entry, given the result of
/// the email lookup.
#[derive(Debug)]
enum EntryPlan {
    Create(CreateParticipantRequest),
    Update(Uuid, UpdateParticipantRequest),
}

fn plan_entry(valid: &ValidEntry, existing: Option<Uuid>) -> EntryPlan {
    match existing {
        Some(id) => EntryPlan::Update(id, valid.update_request()),
        None => EntryPlan::Create(valid.create_request()),
    }
}

fn validate_entry(entry: &BatchEntry) -> Result<ValidEntry, String> {
    let name = entry
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "Name is required".to_string())?;

    let email = match entry.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => email.to_string(),
        None => derive_email(name),
    };

    if entry.badges < 0 || entry.posts < 0 {
        return Err("Badge and post counts cannot be negative".to_string());
    }

    Ok(ValidEntry {
        name: name.to_string(),
        email,
        badges: entry.badges,
        posts: entry.posts,
        google_dev_profile_url: entry.google_dev_profile_url.clone(),
        google_skills_profile_url: entry.google_skills_profile_url.clone(),
    })
}

/// Reconcile batch entries against the store, keyed by email.
///
/// Entries are processed in input order. An existing participant is updated
/// in place, an unknown one is created together with its score. Failures are
/// collected per entry and never abort the rest of the batch, so
/// `created + updated + errors.len()` always equals the number of entries.
pub async fn reconcile(pool: &PgPool, entries: &[BatchEntry]) -> BatchSummary {
    let repo = ParticipantRepository::new(pool);
    let mut summary = BatchSummary::default();

    for entry in entries {
        let valid = match validate_entry(entry) {
            Ok(valid) => valid,
            Err(reason) => {
                summary.errors.push(BatchEntryError {
                    name: entry.name.clone(),
                    email: entry.email.clone(),
                    error: reason,
                });
                continue;
            }
        };

        let outcome = match repo.find_by_email(&valid.email).await {
            Ok(existing) => match plan_entry(&valid, existing.map(|p| p.id)) {
                EntryPlan::Create(create) => repo.create(&create).await.map(|_| {
                    summary.created += 1;
                }),
                EntryPlan::Update(id, update) => repo.update(id, &update).await.map(|_| {
                    summary.updated += 1;
                }),
            },
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            tracing::warn!(email = %valid.email, "batch entry failed: {e}");
            summary.errors.push(BatchEntryError {
                name: Some(valid.name),
                email: Some(valid.email),
                error: e.to_string(),
            });
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Drive the per-entry decision logic against an in-memory email index,
    /// the way [`reconcile`] drives it against the store.
    fn reconcile_in_memory(
        entries: &[BatchEntry],
        store: &mut HashMap<String, Uuid>,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for entry in entries {
            let valid = match validate_entry(entry) {
                Ok(valid) => valid,
                Err(reason) => {
                    summary.errors.push(BatchEntryError {
                        name: entry.name.clone(),
                        email: entry.email.clone(),
                        error: reason,
                    });
                    continue;
                }
            };

            match plan_entry(&valid, store.get(&valid.email).copied()) {
                EntryPlan::Create(create) => {
                    store.insert(create.email.clone(), Uuid::new_v4());
                    summary.created += 1;
                }
                EntryPlan::Update(_, _) => summary.updated += 1,
            }
        }

        summary
    }

    #[test]
    fn test_every_entry_gets_exactly_one_outcome() {
        // Middle line parses (three fields) but has no name, so it must land
        // in the error bucket rather than being dropped.
        let entries = parse_batch_text("John Doe, 2, 3\n, 4, 1\nJane Roe, 1, 0");
        assert_eq!(entries.len(), 3);

        let mut store = HashMap::new();
        let summary = reconcile_in_memory(&entries, &mut store);

        assert_eq!(
            summary.created + summary.updated + summary.errors.len(),
            entries.len()
        );
        assert_eq!(summary.created, 2);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.errors.len(), 1);
    }

    #[test]
    fn test_second_pass_updates_instead_of_duplicating() {
        let entries = parse_batch_text("John Doe, 2, 3\nJane Roe, 1, 0");
        let mut store = HashMap::new();

        let first = reconcile_in_memory(&entries, &mut store);
        assert_eq!(first.created, entries.len());
        assert_eq!(first.updated, 0);

        let second = reconcile_in_memory(&entries, &mut store);
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, entries.len());
        assert!(second.errors.is_empty());
    }

    #[test]
    fn test_plan_keys_on_email_lookup() {
        let entry = BatchEntry {
            name: Some("John Doe".to_string()),
            badges: 1,
            ..Default::default()
        };
        let valid = validate_entry(&entry).unwrap();

        let id = Uuid::new_v4();
        assert!(matches!(
            plan_entry(&valid, Some(id)),
            EntryPlan::Update(found, _) if found == id
        ));
        assert!(matches!(plan_entry(&valid, None), EntryPlan::Create(_)));
    }

    #[test]
    fn test_parse_comma_separated_lines() {
        let entries = parse_batch_text("John Doe, 25, 10\nJane Roe, 3, 0");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_deref(), Some("John Doe"));
        assert_eq!(entries[0].badges, 25);
        assert_eq!(entries[0].posts, 10);
        assert_eq!(entries[1].name.as_deref(), Some("Jane Roe"));
    }

    #[test]
    fn test_parse_tab_separated_lines() {
        let entries = parse_batch_text("Ada Lovelace\t4\t7");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].badges, 4);
        assert_eq!(entries[0].posts, 7);
    }

    #[test]
    fn test_parse_skips_blank_and_short_lines() {
        let entries = parse_batch_text("\n   \nOnly Name, 5\nFull Entry, 1, 2\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("Full Entry"));
    }

    #[test]
    fn test_parse_defaults_bad_counts_to_zero() {
        let entries = parse_batch_text("Someone, lots, 3");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].badges, 0);
        assert_eq!(entries[0].posts, 3);
    }

    #[test]
    fn test_derive_email_is_slugged_and_deterministic() {
        assert_eq!(derive_email("John Doe"), "john-doe@participants.local");
        assert_eq!(derive_email("John Doe"), derive_email("John Doe"));
        assert_eq!(derive_email("  Chioma   Okafor "), "chioma-okafor@participants.local");
    }

    #[test]
    fn test_derive_email_empty_name_falls_back() {
        assert_eq!(derive_email("!!!"), "participant@participants.local");
    }

    #[test]
    fn test_validate_entry_requires_name() {
        let entry = BatchEntry {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_entry(&entry).unwrap_err(), "Name is required");
    }

    #[test]
    fn test_validate_entry_derives_missing_email() {
        let entry = BatchEntry {
            name: Some("Ibrahim Musa".to_string()),
            badges: 24,
            posts: 12,
            ..Default::default()
        };
        let valid = validate_entry(&entry).unwrap();
        assert_eq!(valid.email, "ibrahim-musa@participants.local");
    }

    #[test]
    fn test_validate_entry_keeps_provided_email() {
        let entry = BatchEntry {
            name: Some("A".to_string()),
            email: Some("a@x.com".to_string()),
            badges: 2,
            posts: 3,
            ..Default::default()
        };
        assert_eq!(validate_entry(&entry).unwrap().email, "a@x.com");
    }

    #[test]
    fn test_validate_entry_rejects_negative_counts() {
        let entry = BatchEntry {
            name: Some("A".to_string()),
            badges: -1,
            ..Default::default()
        };
        assert!(validate_entry(&entry).is_err());
    }
}
