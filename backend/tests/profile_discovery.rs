//! Profile discovery, ranking, and self-service flows over the in-memory
//! store.

mod support;

use backend::domain::ports::{ProfilesCommand, ProfilesQuery, UpdateSkillsRequest};
use backend::domain::{
    Availability, ErrorCode, ProfileChanges, ProfileSearchFilter, UserId,
};
use pagination::PageRequest;

use support::{SharedStore, TestServices, member, services};

fn filter(text: Option<&str>, availability: Option<Availability>) -> ProfileSearchFilter {
    ProfileSearchFilter {
        search_text: text.map(str::to_owned),
        availability,
        page: PageRequest::new(0, 6).expect("valid page request"),
    }
}

async fn give_skills(api: &TestServices, user: &UserId, offered: &[&str], wanted: &[&str]) {
    api.profiles
        .update_skills(
            user,
            UpdateSkillsRequest {
                offered: offered.iter().map(|s| (*s).to_owned()).collect(),
                wanted: wanted.iter().map(|s| (*s).to_owned()).collect(),
            },
        )
        .await
        .expect("skills update should succeed");
}

#[tokio::test]
async fn filterless_search_returns_only_eligible_users_by_rating() {
    let store = SharedStore::new();
    let mut high = member("Hana", "Sato");
    high.average_rating = 4.8;
    let mut mid = member("Miro", "Vance");
    mid.average_rating = 3.2;
    let mut low = member("Liv", "Eriksen");
    low.average_rating = 1.1;

    let mut private = member("Pia", "Hidden");
    private.profile_public = false;
    let mut inactive = member("Ivo", "Gone");
    inactive.active = false;
    let mut unverified = member("Uma", "Pending");
    unverified.email_verified = false;

    for user in [&high, &mid, &low, &private, &inactive, &unverified] {
        store.add_user(user.clone());
    }
    let api = services(&store);

    let page = api
        .profiles
        .search(filter(None, None))
        .await
        .expect("search should succeed");

    let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![high.id, mid.id, low.id]);
    assert_eq!(page.total_elements, 3);
}

#[tokio::test]
async fn skill_search_matches_both_directions_without_duplicates() {
    let store = SharedStore::new();
    let mut offers = member("Ada", "Lovelace");
    offers.average_rating = 4.5;
    let mut wants = member("Brin", "Tudor");
    wants.average_rating = 3.0;
    let unrelated = member("Cleo", "Marsh");
    for user in [&offers, &wants, &unrelated] {
        store.add_user(user.clone());
    }
    let api = services(&store);

    // "Go" and "Google Cloud" both match "go"; the user must appear once.
    give_skills(&api, &offers.id, &["Go", "Google Cloud"], &[]).await;
    give_skills(&api, &wants.id, &[], &["Go"]).await;
    give_skills(&api, &unrelated.id, &["Pottery"], &[]).await;

    let page = api
        .profiles
        .search(filter(Some("go"), None))
        .await
        .expect("search should succeed");

    let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![offers.id, wants.id]);
}

#[tokio::test]
async fn name_search_is_a_case_insensitive_substring_match() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    let grace = member("Grace", "Hopper");
    store.add_user(ada.clone());
    store.add_user(grace.clone());
    let api = services(&store);

    let page = api
        .profiles
        .search(filter(Some("LOVEL"), None))
        .await
        .expect("search should succeed");

    let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ada.id]);
}

#[tokio::test]
async fn availability_filter_requires_an_exact_match() {
    let store = SharedStore::new();
    let mut weekender = member("Wren", "Sable");
    weekender.availability = Availability::Weekend;
    let mut worker = member("Wade", "Flint");
    worker.availability = Availability::Working;
    store.add_user(weekender.clone());
    store.add_user(worker.clone());
    let api = services(&store);

    let page = api
        .profiles
        .search(filter(None, Some(Availability::Weekend)))
        .await
        .expect("search should succeed");

    let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![weekender.id]);
}

#[tokio::test]
async fn pagination_windows_the_rating_ordered_results() {
    let store = SharedStore::new();
    let mut expected_order = Vec::new();
    for (index, name) in ["Ana", "Ben", "Cas", "Dee", "Eli"].iter().enumerate() {
        let mut user = member(name, "Paged");
        user.average_rating = 5.0 - index as f64;
        expected_order.push(user.id);
        store.add_user(user);
    }
    let api = services(&store);

    let page = api
        .profiles
        .search(ProfileSearchFilter {
            search_text: None,
            availability: None,
            page: PageRequest::new(1, 2).expect("valid page request"),
        })
        .await
        .expect("search should succeed");

    let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, expected_order[2..4].to_vec());
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next);
    assert!(page.has_previous);
}

#[tokio::test]
async fn public_profiles_hide_ineligible_users_but_own_profile_does_not() {
    let store = SharedStore::new();
    let mut private = member("Pia", "Quiet");
    private.profile_public = false;
    store.add_user(private.clone());
    let api = services(&store);

    let error = api
        .profiles
        .public_profile(&private.id)
        .await
        .expect_err("private profile must be hidden");
    assert_eq!(error.code(), ErrorCode::NotFound);

    let own = api
        .profiles
        .own_profile(&private.id)
        .await
        .expect("own profile ignores the public gate");
    assert_eq!(own.id, private.id);
}

#[tokio::test]
async fn profile_summaries_carry_resolved_skill_lists() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    store.add_user(ada.clone());
    let api = services(&store);

    give_skills(&api, &ada.id, &["Go", "Rust"], &["Piano"]).await;

    let summary = api
        .profiles
        .public_profile(&ada.id)
        .await
        .expect("profile should resolve");
    assert_eq!(summary.skills_offered, vec!["Go", "Rust"]);
    assert_eq!(summary.skills_wanted, vec!["Piano"]);
}

#[tokio::test]
async fn updating_skills_replaces_the_whole_list() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    store.add_user(ada.clone());
    let api = services(&store);

    give_skills(&api, &ada.id, &["Go", "Rust"], &["Piano"]).await;
    give_skills(&api, &ada.id, &["Python"], &[]).await;

    let summary = api
        .profiles
        .own_profile(&ada.id)
        .await
        .expect("profile should resolve");
    assert_eq!(summary.skills_offered, vec!["Python"]);
    assert!(summary.skills_wanted.is_empty());
}

#[tokio::test]
async fn the_catalog_is_case_insensitive_across_users() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    let brin = member("Brin", "Tudor");
    store.add_user(ada.clone());
    store.add_user(brin.clone());
    let api = services(&store);

    // Both spellings must resolve to one catalog entry.
    give_skills(&api, &ada.id, &["Go"], &[]).await;
    give_skills(&api, &brin.id, &["go"], &[]).await;

    let stats = api.profiles.platform_stats().await;
    assert_eq!(stats.total_skills_offered, 1);
}

#[tokio::test]
async fn platform_stats_count_the_documented_aggregates() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    let brin = member("Brin", "Tudor");
    let mut unverified = member("Uma", "Pending");
    unverified.email_verified = false;
    for user in [&ada, &brin, &unverified] {
        store.add_user(user.clone());
    }
    let api = services(&store);

    give_skills(&api, &ada.id, &["Go", "Rust"], &[]).await;
    give_skills(&api, &brin.id, &["Go"], &["Rust"]).await;

    let stats = api.profiles.platform_stats().await;
    assert_eq!(stats.active_members, 2);
    assert_eq!(stats.total_skills_offered, 2);
    assert_eq!(stats.successful_matches, 0);
    assert_eq!(stats.total_connection_requests, 0);
}

#[tokio::test]
async fn profile_updates_apply_only_the_provided_fields() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    store.add_user(ada.clone());
    let api = services(&store);

    api.profiles
        .update_profile(
            &ada.id,
            ProfileChanges {
                bio: Some("I teach compilers".to_owned()),
                availability: Some(Availability::Weekend),
                ..ProfileChanges::default()
            },
        )
        .await
        .expect("update should succeed");

    let summary = api
        .profiles
        .own_profile(&ada.id)
        .await
        .expect("profile should resolve");
    assert_eq!(summary.first_name, "Ada");
    assert_eq!(summary.bio.as_deref(), Some("I teach compilers"));
    assert_eq!(summary.availability, Availability::Weekend);
}

#[tokio::test]
async fn hiding_a_profile_removes_it_from_discovery() {
    let store = SharedStore::new();
    let ada = member("Ada", "Lovelace");
    store.add_user(ada.clone());
    let api = services(&store);

    api.profiles
        .update_profile(
            &ada.id,
            ProfileChanges {
                profile_public: Some(false),
                ..ProfileChanges::default()
            },
        )
        .await
        .expect("update should succeed");

    let page = api
        .profiles
        .search(filter(None, None))
        .await
        .expect("search should succeed");
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn updates_for_unknown_users_are_not_found() {
    let api = services(&SharedStore::new());

    let error = api
        .profiles
        .update_profile(&UserId::random(), ProfileChanges::default())
        .await
        .expect_err("unknown user must fail");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
