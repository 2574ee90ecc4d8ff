//! Calendar workflows: the filtered schedule and session booking.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::collection::FilterableCollection;
use crate::domain::session::{Session, SessionKind, SessionStatus};
use crate::dto::calendar::{CalendarDay, CalendarPageData, CalendarQuery};
use crate::forms::calendar::ScheduleSessionForm;
use crate::repository::{ClientReader, SessionReader, SessionWriter};
use crate::services::{ServiceError, ServiceResult};

const UPCOMING_LIMIT: usize = 5;

/// Loads the calendar page: sessions grouped by day after filtering.
pub fn load_calendar<R>(
    repo: &R,
    query: CalendarQuery,
    now: NaiveDateTime,
) -> ServiceResult<CalendarPageData>
where
    R: SessionReader + ClientReader + ?Sized,
{
    let mut collection = FilterableCollection::new(repo.list_sessions()?);

    if let Some(kind) = query.kind.as_deref().and_then(SessionKind::parse) {
        collection.set_facet("kind", HashSet::from([kind.as_str().to_string()]));
    }
    if let Some(status) = query.status.as_deref().and_then(SessionStatus::parse) {
        collection.set_facet("status", HashSet::from([status.as_str().to_string()]));
    }
    if let Some(client) = query
        .client
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        collection.set_facet("client", HashSet::from([client.to_string()]));
    }
    if let Some(q) = query.q.as_deref() {
        collection.set_query(q);
    }
    collection.set_sort("starts_at", Default::default());

    let visible: Vec<Session> = collection.visible().into_iter().cloned().collect();
    let empty_state = collection.empty_state();

    let mut days: Vec<CalendarDay> = Vec::new();
    for session in &visible {
        let date = session.starts_at.date();
        match days.last_mut() {
            Some(day) if day.date == date => day.sessions.push(session.clone()),
            _ => days.push(CalendarDay {
                date,
                sessions: vec![session.clone()],
            }),
        }
    }

    let upcoming = visible
        .iter()
        .filter(|session| session.starts_at >= now)
        .take(UPCOMING_LIMIT)
        .cloned()
        .collect();

    Ok(CalendarPageData {
        days,
        upcoming,
        clients: repo.list_clients()?,
        empty_state,
        search_query: query.q.clone().filter(|q| !q.trim().is_empty()),
        kind_filter: query.kind,
        status_filter: query.status,
        client_filter: query.client,
    })
}

/// Books a session from the schedule modal. New sessions are confirmed
/// immediately; there is no approval flow.
pub fn schedule_session<R>(
    repo: &R,
    form: ScheduleSessionForm,
    default_duration: u32,
) -> ServiceResult<Session>
where
    R: SessionWriter + ?Sized,
{
    use validator::Validate;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate schedule form: {err}");
        return Err(ServiceError::Form("Please check the session details".to_string()));
    }

    let new_session = form.into_new_session(default_duration)?;

    repo.create_session(&new_session).map_err(|err| {
        log::error!("Failed to schedule session: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::repository::seed;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn sessions_group_by_day_in_start_order() {
        let mut repo = MockRepository::new();
        repo.expect_list_sessions()
            .returning(|| Ok(seed::sessions()));
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let data =
            load_calendar(&repo, CalendarQuery::default(), at(30, 8)).expect("calendar loads");

        assert_eq!(data.days.len(), 4);
        assert_eq!(data.days[0].sessions.len(), 2); // Jan 30: two sessions
        assert_eq!(data.days[0].sessions[0].id, 1);
        assert_eq!(data.days[0].sessions[1].id, 2);
        assert_eq!(data.upcoming.len(), 5);
    }

    #[test]
    fn kind_facet_narrows_the_schedule() {
        let mut repo = MockRepository::new();
        repo.expect_list_sessions()
            .returning(|| Ok(seed::sessions()));
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let mut query = CalendarQuery::default();
        query.kind = Some("workshop".to_string());
        let data = load_calendar(&repo, query, at(30, 8)).expect("calendar loads");

        let ids: Vec<i32> = data
            .days
            .iter()
            .flat_map(|day| day.sessions.iter().map(|s| s.id))
            .collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn scheduling_uses_the_default_duration_when_blank() {
        let mut repo = MockRepository::new();
        repo.expect_create_session()
            .withf(|new_session| new_session.duration_minutes == 45)
            .times(1)
            .returning(|new_session| {
                Ok(Session {
                    id: 99,
                    client_id: new_session.client_id,
                    client_name: "Sarah Johnson".to_string(),
                    starts_at: new_session.starts_at,
                    kind: new_session.kind,
                    status: SessionStatus::Confirmed,
                    location: new_session.location.clone(),
                    duration_minutes: new_session.duration_minutes,
                    has_reminder: new_session.has_reminder,
                    is_recurring: new_session.is_recurring,
                    notes: new_session.notes.clone(),
                })
            });

        let form = ScheduleSessionForm {
            client_id: 1,
            date: "2025-02-10".to_string(),
            time: "10:00".to_string(),
            kind: SessionKind::Coaching,
            duration_minutes: None,
            location: "Online".to_string(),
            send_reminder: None,
            recurring: None,
            notes: String::new(),
        };

        let session = schedule_session(&repo, form, 45).expect("session scheduled");
        assert_eq!(session.status, SessionStatus::Confirmed);
    }
}
