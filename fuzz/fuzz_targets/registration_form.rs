//! Throws arbitrary text at the registration form validation. Whatever goes
//! in, an accepted form must describe a team of 2 to 4 with one name per
//! non-leader member.

#![no_main]

use chrono::NaiveDateTime;
use libfuzzer_sys::fuzz_target;
use skillsprint::funnel::register::RegistrationForm;

fuzz_target!(|data: (String, String, String, String, String, Vec<String>)| {
    let (team_name, team_size, leader, email, phone, team_members) = data;
    let form = RegistrationForm {
        team_name,
        team_size,
        team_leader_name: leader,
        team_leader_email: email,
        team_leader_phone: phone,
        team_members,
        form_token: "fuzz".to_string(),
        ..Default::default()
    };

    if let Ok(registration) = form.validate(NaiveDateTime::default()) {
        assert!((2..=4).contains(&registration.team_size));
        assert_eq!(
            registration.team_members.len() as i64,
            registration.team_size - 1
        );
        assert!(registration.team_members.iter().all(|m| !m.name.is_empty()));
        assert!(!registration.team_name.trim().is_empty());
    }
});
