// src/modules/timeline/application/mapping.rs
//
// The backend keeps two collections (experience, education) inside the
// `/about` document; the admin panel edits one merged list. These two
// functions are the only place that translation happens, so count and
// relative order within each sub-collection survive a round trip.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::timeline::domain::entities::{
    EducationRecord, ExperienceRecord, TimelineEntry, TimelineKind,
};
use crate::timeline::domain::period::{self, PeriodError};

fn wire_date(date: NaiveDate) -> DateTime<Utc> {
    // first-of-month midnight, the same instant the editor writes
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Splits the merged display list into the two backend collections. Each
/// entry's period is parsed into real dates and its list position becomes
/// the persisted `order`. A malformed period aborts the whole split; the
/// caller surfaces it as a validation failure instead of persisting a
/// silently-substituted date.
pub fn split_entries(
    entries: &[TimelineEntry],
) -> Result<(Vec<ExperienceRecord>, Vec<EducationRecord>), PeriodError> {
    let mut experiences = Vec::new();
    let mut educations = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let range = period::parse_range(&entry.period)?;
        let order = Some(index as i64);
        match entry.kind {
            TimelineKind::Education => educations.push(EducationRecord {
                institution: entry.company.clone(),
                degree: entry.title.clone(),
                start_date: wire_date(range.start),
                end_date: range.end.map(wire_date),
                description: entry.description.clone(),
                order,
            }),
            TimelineKind::Experience => experiences.push(ExperienceRecord {
                company: entry.company.clone(),
                position: entry.title.clone(),
                start_date: wire_date(range.start),
                end_date: range.end.map(wire_date),
                current: range.end.is_none(),
                description: entry.description.clone(),
                order,
            }),
        }
    }

    Ok((experiences, educations))
}

/// Rebuilds the merged display list from the two backend collections.
/// Entries get fresh client-only ids. Sorting follows manual `order`,
/// falling back to newest start date first for entries without one.
pub fn merge_collections(
    experiences: &[ExperienceRecord],
    educations: &[EducationRecord],
) -> Vec<TimelineEntry> {
    let mut merged: Vec<(TimelineEntry, DateTime<Utc>)> =
        Vec::with_capacity(experiences.len() + educations.len());

    for record in experiences {
        let entry = TimelineEntry {
            id: Uuid::new_v4(),
            kind: TimelineKind::Experience,
            period: render_period(record.start_date, record.end_date, record.current),
            title: record.position.clone(),
            company: record.company.clone(),
            description: record.description.clone(),
            order: record.order,
        };
        merged.push((entry, record.start_date));
    }

    for record in educations {
        let entry = TimelineEntry {
            id: Uuid::new_v4(),
            kind: TimelineKind::Education,
            period: render_period(record.start_date, record.end_date, false),
            title: record.degree.clone(),
            company: record.institution.clone(),
            description: record.description.clone(),
            order: record.order,
        };
        merged.push((entry, record.start_date));
    }

    // manual order first (entries without one sort last), newest start
    // breaks ties
    merged.sort_by_key(|(entry, start)| {
        (entry.order.unwrap_or(i64::MAX), std::cmp::Reverse(*start))
    });

    merged.into_iter().map(|(entry, _)| entry).collect()
}

fn render_period(start: DateTime<Utc>, end: Option<DateTime<Utc>>, current: bool) -> String {
    let range = period::PeriodRange {
        start: start.date_naive(),
        end: if current { None } else { end.map(|e| e.date_naive()) },
    };
    period::compose_range(&range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: TimelineKind, period: &str, title: &str, company: &str) -> TimelineEntry {
        TimelineEntry::new(kind, period, title, company, "")
    }

    #[test]
    fn education_lands_in_the_education_collection() {
        let entries = vec![entry(
            TimelineKind::Education,
            "Jan 2020 - Dec 2023",
            "BSc Computer Science",
            "State University",
        )];

        let (experiences, educations) = split_entries(&entries).unwrap();
        assert!(experiences.is_empty());
        assert_eq!(educations.len(), 1);
        assert_eq!(educations[0].institution, "State University");
        assert_eq!(educations[0].degree, "BSc Computer Science");
        assert_eq!(period::format_label(educations[0].start_date.date_naive()), "Jan 2020");
        assert_eq!(
            educations[0].end_date.map(|d| period::format_label(d.date_naive())),
            Some("Dec 2023".to_string())
        );
    }

    #[test]
    fn present_periods_become_current_with_no_end_date() {
        let entries = vec![entry(
            TimelineKind::Experience,
            "Mar 2025 - PRESENT",
            "Developer",
            "Acme",
        )];

        let (experiences, _) = split_entries(&entries).unwrap();
        assert!(experiences[0].current);
        assert!(experiences[0].end_date.is_none());
    }

    #[test]
    fn split_then_merge_preserves_counts_order_and_the_sentinel() {
        let entries = vec![
            entry(TimelineKind::Experience, "Mar 2025 - PRESENT", "Dev", "Acme"),
            entry(TimelineKind::Experience, "Aug 2024 - Jan 2025", "Intern", "Beta"),
            entry(TimelineKind::Education, "Aug 2020 - May 2024", "BSc", "Uni"),
        ];

        let (experiences, educations) = split_entries(&entries).unwrap();
        assert_eq!(experiences.len(), 2);
        assert_eq!(educations.len(), 1);

        let merged = merge_collections(&experiences, &educations);
        assert_eq!(merged.len(), 3);
        let periods: Vec<&str> = merged.iter().map(|e| e.period.as_str()).collect();
        assert_eq!(
            periods,
            vec!["Mar 2025 - PRESENT", "Aug 2024 - Jan 2025", "Aug 2020 - May 2024"]
        );
        assert_eq!(merged[0].kind, TimelineKind::Experience);
        assert_eq!(merged[2].kind, TimelineKind::Education);
    }

    #[test]
    fn split_records_list_position_as_order() {
        let entries = vec![
            entry(TimelineKind::Experience, "Jan 2024 - Feb 2024", "A", "A"),
            entry(TimelineKind::Education, "Jan 2023 - Feb 2023", "B", "B"),
            entry(TimelineKind::Experience, "Jan 2022 - Feb 2022", "C", "C"),
        ];

        let (experiences, educations) = split_entries(&entries).unwrap();
        assert_eq!(experiences[0].order, Some(0));
        assert_eq!(educations[0].order, Some(1));
        assert_eq!(experiences[1].order, Some(2));
    }

    #[test]
    fn merge_falls_back_to_newest_start_when_order_is_missing() {
        let (mut experiences, educations) = split_entries(&[
            entry(TimelineKind::Experience, "Jan 2021 - Feb 2021", "Old", "Acme"),
            entry(TimelineKind::Experience, "Jan 2024 - Feb 2024", "New", "Acme"),
        ])
        .unwrap();
        for record in &mut experiences {
            record.order = None;
        }

        let merged = merge_collections(&experiences, &educations);
        assert_eq!(merged[0].title, "New");
        assert_eq!(merged[1].title, "Old");
    }

    #[test]
    fn malformed_period_aborts_the_split() {
        let entries = vec![entry(TimelineKind::Experience, "sometime - later", "X", "Y")];
        assert!(split_entries(&entries).is_err());
    }
}
