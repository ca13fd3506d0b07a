mod common;

use chrono::Utc;
use uuid::Uuid;

use herald::domain::{Role, UserProfile, UserQuery};
use herald::repository::{SqliteUserRepository, UserRepository};

fn profile(name: &str, email: &str, role: Role, department: &str) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: name.to_string(),
        first_name: None,
        last_name: None,
        role,
        department: department.to_string(),
        level: None,
        avatar: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn user_crud_round_trip() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = SqliteUserRepository::new(pool);

    let created = repo
        .create(profile(
            "Test Student",
            "student@campus.edu",
            Role::Student,
            "Physics",
        ))
        .await?;
    assert_eq!(created.email, "student@campus.edu");
    assert_eq!(created.role, Role::Student);

    let mut found = repo.find_by_id(created.id).await?.expect("should exist");
    assert_eq!(found.name, "Test Student");

    found.department = "Mathematics".to_string();
    found.level = Some("300".to_string());
    let updated = repo.update(created.id, found).await?;
    assert_eq!(updated.department, "Mathematics");
    assert_eq!(updated.level.as_deref(), Some("300"));

    Ok(())
}

#[tokio::test]
async fn listing_filters_by_role_department_and_search() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = SqliteUserRepository::new(pool);

    repo.create(profile(
        "Amina Yusuf",
        "amina@campus.edu",
        Role::Student,
        "Physics",
    ))
    .await?;
    repo.create(profile(
        "Bola Adeyemi",
        "bola@campus.edu",
        Role::Lecturer,
        "Physics",
    ))
    .await?;
    repo.create(profile(
        "Chidi Okafor",
        "chidi@campus.edu",
        Role::Student,
        "Engineering",
    ))
    .await?;

    let students = repo
        .list(&UserQuery {
            role: Some(Role::Student),
            ..Default::default()
        })
        .await?;
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|u| u.role == Role::Student));

    let physics = repo
        .list(&UserQuery {
            department: Some("Physics".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(physics.len(), 2);

    // Search matches name or email, case-insensitively, ordered by name.
    let by_name = repo
        .list(&UserQuery {
            search: Some("BOLA".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Bola Adeyemi");

    let by_email = repo
        .list(&UserQuery {
            search: Some("chidi@".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].name, "Chidi Okafor");

    Ok(())
}

#[tokio::test]
async fn listing_is_capped_at_the_default_search_limit() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = SqliteUserRepository::new(pool);

    for i in 0..25 {
        repo.create(profile(
            &format!("Student {:02}", i),
            &format!("student{}@campus.edu", i),
            Role::Student,
            "Physics",
        ))
        .await?;
    }

    let capped = repo.list(&UserQuery::default()).await?;
    assert_eq!(capped.len(), 20);

    let widened = repo
        .list(&UserQuery {
            limit: Some(25),
            ..Default::default()
        })
        .await?;
    assert_eq!(widened.len(), 25);

    Ok(())
}

#[tokio::test]
async fn stats_count_each_role() -> anyhow::Result<()> {
    let pool = common::setup_pool().await?;
    let repo = SqliteUserRepository::new(pool);

    for i in 0..3 {
        repo.create(profile(
            &format!("Student {}", i),
            &format!("s{}@campus.edu", i),
            Role::Student,
            "Physics",
        ))
        .await?;
    }
    repo.create(profile(
        "A Lecturer",
        "lecturer@campus.edu",
        Role::Lecturer,
        "Physics",
    ))
    .await?;
    repo.create(profile("An Admin", "admin@campus.edu", Role::Admin, "Admin"))
        .await?;

    let stats = repo.stats().await?;
    assert_eq!(stats.total, 5);
    assert_eq!(stats.students, 3);
    assert_eq!(stats.lecturers, 1);
    assert_eq!(stats.admins, 1);

    Ok(())
}
