// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The user profile: typed domain data plus the four label-driven lookup
//! cascades the Answer Resolver consults (profile mapping, yes/no
//! patterns, demographic defaults, free-text defaults).
//!
//! The original source modeled the profile as a raw `dict` walked by a
//! dotted-path string key (`"work_experience.0.company"`). This crate
//! keeps the dotted-path *addressing* scheme (label mappings still name
//! fields that way, since that's the natural vocabulary for "which field
//! on the form") but resolves it against a typed struct via
//! [`GetByPath::get_path`] instead of an untyped `serde_json::Value`
//! walk, so a typo in a mapping is a compile error in the match arms
//! here, not a silent `None` at runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub street_address: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub discipline: String,
    pub start_month: String,
    pub start_year: String,
    pub end_month: String,
    pub end_year: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperienceEntry {
    pub company: String,
    pub title: String,
    pub start_month: String,
    pub start_year: String,
    pub end_month: String,
    pub end_year: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Demographics {
    pub gender: String,
    pub hispanic_latino: String,
    pub race_ethnicity: String,
    pub veteran_status: String,
    pub disability_status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkAuthorization {
    pub authorized_us: String,
    pub requires_sponsorship: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleFiles {
    pub cv: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub base_path: String,
    pub by_role: HashMap<String, RoleFiles>,
    pub default_role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonAnswers {
    pub how_heard: String,
}

/// The full user profile, loaded once at daemon/CLI startup and shared
/// read-only across the Ingestion Orchestrator and Autofill Engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub personal: Personal,
    pub links: Links,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub demographics: Demographics,
    pub work_authorization: WorkAuthorization,
    pub certifications: Vec<String>,
    pub common_answers: CommonAnswers,
    pub files: FilesConfig,
    /// Free-text defaults for common open questions (salary expectation,
    /// "how did you hear about us", notice period, etc), keyed by the
    /// same pattern strings as [`TEXT_DEFAULT_PATTERNS`]. Unlike the
    /// original source, these live on the profile rather than a compiled-
    /// in table, since they're specific to one applicant's answers.
    pub text_defaults: HashMap<String, String>,
}

/// Resolves a dotted-path key (`"personal.first_name"`,
/// `"education.0.school"`) against a value. Mirrors the original source's
/// `Profile.get`, minus the untyped traversal: an unrecognized path
/// returns `None` rather than panicking or silently stringifying `null`.
pub trait GetByPath {
    fn get_path(&self, path: &str) -> Option<String>;
}

impl GetByPath for Profile {
    fn get_path(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('.').collect();
        let value = match segments.as_slice() {
            ["personal", field] => get_personal(&self.personal, field),
            ["links", field] => get_links(&self.links, field),
            ["education", idx, field] => {
                let i: usize = idx.parse().ok()?;
                get_education(self.education.get(i)?, field)
            }
            ["work_experience", idx, field] => {
                let i: usize = idx.parse().ok()?;
                get_work_experience(self.work_experience.get(i)?, field)
            }
            ["common_answers", field] => get_common_answers(&self.common_answers, field),
            _ => None,
        }?;
        (!value.is_empty()).then_some(value)
    }
}

fn get_personal(p: &Personal, field: &str) -> Option<String> {
    Some(match field {
        "first_name" => p.first_name.clone(),
        "last_name" => p.last_name.clone(),
        "full_name" => p.full_name.clone(),
        "email" => p.email.clone(),
        "phone" => p.phone.clone(),
        "city" => p.city.clone(),
        "state" => p.state.clone(),
        "country" => p.country.clone(),
        "zip_code" => p.zip_code.clone(),
        "street_address" => p.street_address.clone(),
        "location" => p.location.clone(),
        _ => return None,
    })
}

fn get_links(l: &Links, field: &str) -> Option<String> {
    Some(match field {
        "linkedin" => l.linkedin.clone(),
        "github" => l.github.clone(),
        _ => return None,
    })
}

fn get_education(e: &EducationEntry, field: &str) -> Option<String> {
    Some(match field {
        "school" => e.school.clone(),
        "degree" => e.degree.clone(),
        "discipline" => e.discipline.clone(),
        "start_month" => e.start_month.clone(),
        "start_year" => e.start_year.clone(),
        "end_month" => e.end_month.clone(),
        "end_year" => e.end_year.clone(),
        _ => return None,
    })
}

fn get_work_experience(w: &WorkExperienceEntry, field: &str) -> Option<String> {
    Some(match field {
        "company" => w.company.clone(),
        "title" => w.title.clone(),
        "start_month" => w.start_month.clone(),
        "start_year" => w.start_year.clone(),
        "end_month" => w.end_month.clone(),
        "end_year" => w.end_year.clone(),
        "current" => w.current.to_string(),
        "description" => w.description.clone(),
        _ => return None,
    })
}

fn get_common_answers(c: &CommonAnswers, field: &str) -> Option<String> {
    Some(match field {
        "how_heard" => c.how_heard.clone(),
        _ => return None,
    })
}

/// One entry in the label→profile-key cascade: `pattern` is matched as a
/// whole-word substring of the lowercased field label (order matters —
/// more specific patterns must precede generic ones that would otherwise
/// shadow them, e.g. the education-specific date patterns before the
/// generic work-experience ones).
pub struct LabelMapping {
    pub pattern: &'static str,
    pub profile_key: &'static str,
}

/// The label→profile-key table, in priority order. Ordering is part of
/// the contract: `"education start month"` must precede `"start month"`
/// or a field labeled "Education Start Month" would resolve against
/// `work_experience.0.start_month` instead.
pub const LABEL_MAPPINGS: &[LabelMapping] = &[
    LabelMapping { pattern: "first name", profile_key: "personal.first_name" },
    LabelMapping { pattern: "last name", profile_key: "personal.last_name" },
    LabelMapping { pattern: "email", profile_key: "personal.email" },
    LabelMapping { pattern: "phone", profile_key: "personal.phone" },
    LabelMapping { pattern: "city", profile_key: "personal.city" },
    LabelMapping { pattern: "state", profile_key: "personal.state" },
    LabelMapping { pattern: "country", profile_key: "personal.country" },
    LabelMapping { pattern: "zip", profile_key: "personal.zip_code" },
    LabelMapping { pattern: "postal", profile_key: "personal.zip_code" },
    LabelMapping { pattern: "street", profile_key: "personal.street_address" },
    LabelMapping { pattern: "address", profile_key: "personal.street_address" },
    LabelMapping { pattern: "your address", profile_key: "personal.street_address" },
    LabelMapping { pattern: "home address", profile_key: "personal.street_address" },
    LabelMapping { pattern: "linkedin", profile_key: "links.linkedin" },
    LabelMapping { pattern: "github", profile_key: "links.github" },
    // Education dates must precede the generic work-experience date
    // patterns below — see the doc comment on this table.
    LabelMapping { pattern: "education start month", profile_key: "education.0.start_month" },
    LabelMapping { pattern: "education start year", profile_key: "education.0.start_year" },
    LabelMapping { pattern: "education end month", profile_key: "education.0.end_month" },
    LabelMapping { pattern: "education end year", profile_key: "education.0.end_year" },
    LabelMapping { pattern: "school", profile_key: "education.0.school" },
    LabelMapping { pattern: "university", profile_key: "education.0.school" },
    LabelMapping { pattern: "degree", profile_key: "education.0.degree" },
    LabelMapping { pattern: "discipline", profile_key: "education.0.discipline" },
    LabelMapping { pattern: "field of study", profile_key: "education.0.discipline" },
    LabelMapping { pattern: "company name", profile_key: "work_experience.0.company" },
    LabelMapping { pattern: "employer", profile_key: "work_experience.0.company" },
    LabelMapping { pattern: "current company", profile_key: "work_experience.0.company" },
    LabelMapping { pattern: "current employer", profile_key: "work_experience.0.company" },
    LabelMapping { pattern: "job title", profile_key: "work_experience.0.title" },
    LabelMapping { pattern: "title", profile_key: "work_experience.0.title" },
    LabelMapping { pattern: "start date month", profile_key: "work_experience.0.start_month" },
    LabelMapping { pattern: "start month", profile_key: "work_experience.0.start_month" },
    LabelMapping { pattern: "start date year", profile_key: "work_experience.0.start_year" },
    LabelMapping { pattern: "start year", profile_key: "work_experience.0.start_year" },
    LabelMapping { pattern: "end date month", profile_key: "work_experience.0.end_month" },
    LabelMapping { pattern: "end month", profile_key: "work_experience.0.end_month" },
    LabelMapping { pattern: "end date year", profile_key: "work_experience.0.end_year" },
    LabelMapping { pattern: "end year", profile_key: "work_experience.0.end_year" },
    LabelMapping { pattern: "how did you hear", profile_key: "common_answers.how_heard" },
    LabelMapping { pattern: "full name", profile_key: "personal.full_name" },
    LabelMapping { pattern: "your name", profile_key: "personal.full_name" },
    LabelMapping { pattern: "legal name", profile_key: "personal.full_name" },
    LabelMapping { pattern: "preferred name", profile_key: "personal.first_name" },
    LabelMapping { pattern: "current location", profile_key: "personal.location" },
    LabelMapping { pattern: "where are you located", profile_key: "personal.location" },
    LabelMapping { pattern: "location", profile_key: "personal.location" },
    LabelMapping { pattern: "website", profile_key: "links.linkedin" },
    LabelMapping { pattern: "portfolio", profile_key: "links.linkedin" },
    LabelMapping { pattern: "personal website", profile_key: "links.linkedin" },
];

/// Yes/No question patterns, in priority order. As in the table above,
/// more specific phrases must precede generic ones — `"non-compete"`
/// before `"agree"`, since "Do you work under a non-compete agreement?"
/// contains both and should answer "No", not "Yes".
pub const YES_NO_PATTERNS: &[(&str, &str)] = &[
    ("18 years", "Yes"),
    ("authorized to work", "Yes"),
    ("legally authorized", "Yes"),
    ("eligible to work", "Yes"),
    ("require sponsorship", "No"),
    ("visa sponsorship", "No"),
    ("government official", "No"),
    ("close relative of a government", "No"),
    ("conflict of interest", "No"),
    ("connected to", "No"),
    ("financial interest", "No"),
    ("referred to this position by", "No"),
    ("senior leader", "No"),
    ("previously employed", "No"),
    ("previously been employed", "No"),
    ("former employee", "No"),
    ("confirm receipt", "Confirmed"),
    ("confirm", "Yes"),
    ("acknowledge", "Yes"),
    ("non-compete", "No"),
    ("non-disclosure", "Yes"),
    ("agree", "Yes"),
    ("i understand", "Yes"),
    ("current role", "Yes"),
    ("currently work here", "Yes"),
    ("i currently work", "Yes"),
    ("currently work", "Yes"),
    ("willing to relocate", "Yes"),
    ("background check", "Yes"),
    ("drug test", "Yes"),
];

/// Free-text defaults for common open-ended questions the original source
/// baked in as one specific user's answers. Kept as a configurable table
/// on [`Profile`] rather than compiled-in strings — see
/// [`Profile::text_defaults`].
pub const TEXT_DEFAULT_PATTERNS: &[&str] = &[
    "years of experience",
    "years experience",
    "how many years",
    "how did you hear",
    "how did you find",
    "where did you hear",
    "how were you referred",
    "referred by",
    "referral source",
    "source of application",
    "salary",
    "desired salary",
    "expected salary",
    "compensation",
    "salary expectation",
    "annual salary",
    "notice period",
    "when can you start",
    "earliest start",
    "availability",
    "start date",
    "website",
    "portfolio",
    "personal website",
    "additional information",
];

/// Demographic label→category map, consulted before the hardcoded
/// defaults so a filled-in profile always wins.
const DEMOGRAPHIC_FIELD_MAP: &[(&str, &str)] = &[
    ("gender", "gender"),
    ("hispanic", "hispanic_latino"),
    ("latino", "hispanic_latino"),
    ("race", "race_ethnicity"),
    ("ethnicity", "race_ethnicity"),
    ("veteran", "veteran_status"),
    ("disability", "disability_status"),
];

impl Profile {
    /// Cascade step 2 of the Answer Resolver: matches `label` against
    /// [`LABEL_MAPPINGS`] in order, returning the first pattern whose
    /// resolved profile value is non-empty.
    pub fn find_by_label(&self, label: &str) -> Option<(String, &'static str)> {
        let lower = label.to_lowercase();
        LABEL_MAPPINGS.iter().find_map(|m| {
            word_boundary_match(&lower, m.pattern)
                .then(|| self.get_path(m.profile_key).map(|v| (v, m.profile_key)))
                .flatten()
        })
    }

    /// Cascade step 3: Yes/No question patterns.
    pub fn find_yes_no(&self, label: &str) -> Option<&'static str> {
        let lower = label.to_lowercase();
        YES_NO_PATTERNS
            .iter()
            .find(|(pattern, _)| lower.contains(pattern))
            .map(|(_, answer)| *answer)
    }

    /// Cascade step 4: demographic answer, profile value first, then the
    /// configured defaults.
    pub fn find_demographic(&self, label: &str, defaults: &crate::config::DemographicDefaults) -> Option<String> {
        let lower = label.to_lowercase();
        for (pattern, field) in DEMOGRAPHIC_FIELD_MAP {
            if lower.contains(pattern) {
                let value = match *field {
                    "gender" => &self.demographics.gender,
                    "hispanic_latino" => &self.demographics.hispanic_latino,
                    "race_ethnicity" => &self.demographics.race_ethnicity,
                    "veteran_status" => &self.demographics.veteran_status,
                    "disability_status" => &self.demographics.disability_status,
                    _ => unreachable!("DEMOGRAPHIC_FIELD_MAP only names the five fields above"),
                };
                if !value.is_empty() {
                    return Some(value.clone());
                }
            }
        }
        for (pattern, _) in DEMOGRAPHIC_FIELD_MAP {
            if lower.contains(pattern) {
                return Some(match *pattern {
                    "gender" => defaults.gender.clone(),
                    "hispanic" | "latino" => defaults.hispanic.clone(),
                    "race" => defaults.race.clone(),
                    "ethnicity" => defaults.ethnicity.clone(),
                    "veteran" => defaults.veteran.clone(),
                    "disability" => defaults.disability.clone(),
                    _ => unreachable!(),
                });
            }
        }
        None
    }

    /// Cascade step 6: free-text defaults for common open questions,
    /// sourced from the profile's own `text_defaults` map (keyed the same
    /// way as [`TEXT_DEFAULT_PATTERNS`]) rather than a compiled-in table.
    pub fn find_text_default(&self, label: &str) -> Option<String> {
        let lower = label.to_lowercase();
        TEXT_DEFAULT_PATTERNS
            .iter()
            .find(|pattern| lower.contains(*pattern))
            .and_then(|pattern| self.text_defaults.get(*pattern).cloned())
    }

    /// Plain-text summary used as the LLM oracle's context string.
    pub fn context_summary(&self) -> String {
        let w = self.work_experience.first();
        format!(
            "Name: {} {}\nLocation: {}\nRole: {} at {}",
            self.personal.first_name,
            self.personal.last_name,
            self.personal.location,
            w.map(|w| w.title.as_str()).unwrap_or(""),
            w.map(|w| w.company.as_str()).unwrap_or(""),
        )
    }

    /// Richer context for free-text generation, including certifications
    /// and work-authorization status.
    pub fn ai_context(&self) -> String {
        let w = self.work_experience.first();
        let certs = if self.certifications.is_empty() {
            String::new()
        } else {
            self.certifications.join(", ")
        };
        format!(
            "Name: {} {}\nLocation: {}, {}\nCurrent Role: {} at {}\nExperience: {}\nCertifications: {}\nAuthorized to work: {}\nNeeds sponsorship: {}\nGender: {}\nVeteran: {}\nDisability: {}",
            self.personal.first_name,
            self.personal.last_name,
            self.personal.location,
            self.personal.state,
            w.map(|w| w.title.as_str()).unwrap_or(""),
            w.map(|w| w.company.as_str()).unwrap_or(""),
            w.map(|w| w.description.as_str()).unwrap_or(""),
            certs,
            self.work_authorization.authorized_us,
            self.work_authorization.requires_sponsorship,
            self.demographics.gender,
            self.demographics.veteran_status,
            self.demographics.disability_status,
        )
    }

    /// Whether the applicant's current (first) work-experience entry is
    /// marked `current`, used to skip end-date fields for that entry.
    pub fn current_role(&self) -> bool {
        self.work_experience.first().is_some_and(|w| w.current)
    }

    /// Picks CV/cover-letter file names for `job_title`, matching the
    /// original source's role-detection pattern table. Returns `None` for
    /// either slot the `by_role`/`default_role` configuration doesn't name
    /// (existence on disk is the caller's concern, not this crate's).
    pub fn files_for_role(&self, job_title: &str) -> (Option<String>, Option<String>) {
        const ROLE_PATTERNS: &[(&str, &[&str])] = &[
            ("TPM", &["technical program manager", "tpm"]),
            ("Product Manager", &["product manager"]),
            ("Product Owner", &["product owner"]),
            ("Project Manager", &["project manager"]),
            ("Scrum Master", &["scrum master", "agile coach"]),
            ("Delivery Lead", &["delivery lead", "delivery manager"]),
        ];
        let lower = job_title.to_lowercase();
        let detected = ROLE_PATTERNS
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| lower.contains(p)))
            .map(|(role, _)| *role)
            .unwrap_or(self.files.default_role.as_str());

        let role_files = self
            .files
            .by_role
            .get(detected)
            .or_else(|| self.files.by_role.get(&self.files.default_role));

        match role_files {
            Some(rf) => (rf.cv.clone(), rf.cover_letter.clone()),
            None => (None, None),
        }
    }
}

fn word_boundary_match(haystack: &str, needle: &str) -> bool {
    if needle.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        let pattern = format!(r"\b{}\b", regex::escape(needle));
        regex::Regex::new(&pattern).map(|re| re.is_match(haystack)).unwrap_or(false)
    } else {
        haystack.contains(needle)
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
