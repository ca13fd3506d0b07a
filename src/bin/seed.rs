use clap::Parser;
use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use herald::{
    domain::{Announcement, Category, Priority, Role, UserProfile},
    repository::{
        AnnouncementRepository, SqliteAnnouncementRepository, SqliteUserRepository, UserRepository,
    },
};

const DEPARTMENTS: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Physics",
    "Engineering",
    "Business Administration",
];

const CATEGORIES: &[Category] = &[
    Category::Academic,
    Category::Event,
    Category::Sport,
    Category::StudentAffairs,
    Category::Urgent,
    Category::General,
    Category::Administrative,
];

const PRIORITIES: &[Priority] = &[
    Priority::Low,
    Priority::Medium,
    Priority::High,
    Priority::Urgent,
];

#[derive(Parser)]
#[command(name = "seed", about = "Populate the herald database with sample data")]
struct Args {
    /// Number of announcements to generate
    #[arg(long, default_value_t = 40)]
    announcements: usize,

    /// Number of student profiles to generate
    #[arg(long, default_value_t = 12)]
    students: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:herald.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let user_repo = SqliteUserRepository::new(db_pool.clone());
    let announcement_repo = SqliteAnnouncementRepository::new(db_pool.clone());

    println!("👥 Creating users...");

    let now = Utc::now();
    let admin = user_repo
        .create(UserProfile {
            id: Uuid::new_v4(),
            email: "admin@campus.edu".to_string(),
            name: "Campus Admin".to_string(),
            first_name: Some("Campus".to_string()),
            last_name: Some("Admin".to_string()),
            role: Role::Admin,
            department: "Administration".to_string(),
            level: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        })
        .await?;

    // One lecturer per department; they author the announcements.
    let mut staff = vec![admin.clone()];
    for department in DEPARTMENTS {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let lecturer = user_repo
            .create(UserProfile {
                id: Uuid::new_v4(),
                email: SafeEmail().fake(),
                name: format!("{} {}", first, last),
                first_name: Some(first),
                last_name: Some(last),
                role: Role::Lecturer,
                department: department.to_string(),
                level: None,
                avatar: None,
                created_at: now,
                updated_at: now,
            })
            .await?;
        staff.push(lecturer);
    }

    for i in 0..args.students {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        user_repo
            .create(UserProfile {
                id: Uuid::new_v4(),
                email: SafeEmail().fake(),
                name: format!("{} {}", first, last),
                first_name: Some(first),
                last_name: Some(last),
                role: Role::Student,
                department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
                level: Some(format!("{}00", (i % 4) + 1)),
                avatar: None,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    println!("  ✅ Created {} users", 1 + DEPARTMENTS.len() + args.students);

    println!("📢 Creating announcements...");

    for i in 0..args.announcements {
        let author = &staff[i % staff.len()];
        let published_at = now - Duration::hours(i as i64 * 7);

        announcement_repo
            .create(Announcement {
                id: Uuid::new_v4(),
                title: Sentence(3..8).fake(),
                excerpt: Sentence(8..16).fake(),
                content: Paragraph(3..8).fake(),
                category: CATEGORIES[i % CATEGORIES.len()],
                department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
                priority: PRIORITIES[i % PRIORITIES.len()],
                author_id: author.id,
                author: None,
                image_url: None,
                published_at,
                view_count: (0..200).fake::<i64>(),
                is_deleted: false,
                created_at: published_at,
                updated_at: published_at,
            })
            .await?;
    }

    println!("  ✅ Created {} announcements", args.announcements);

    println!("\n✨ Database seeding complete!");
    println!("\n📝 Admin profile: admin@campus.edu ({})", admin.id);

    Ok(())
}
