use crate::models::Job;

/// Trims surrounding whitespace from every text field. Idempotent.
pub fn normalize(mut job: Job) -> Job {
    for value in [
        &mut job.title,
        &mut job.link,
        &mut job.company,
        &mut job.location,
        &mut job.date,
    ] {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
    job
}
