use sqlx::PgPool;

use pressroom_db::models::blog::{CreateBlog, UpdateBlog};
use pressroom_db::repositories::BlogRepo;

fn blog_input(domain: &str) -> CreateBlog {
    CreateBlog {
        name: "Coffee Notes".to_string(),
        domain: domain.to_string(),
        niche: Some("coffee".to_string()),
        description: Some("Espresso and filter brewing".to_string()),
        wp_base_url: format!("https://{domain}"),
        wp_username: "editor".to_string(),
        wp_app_password: "app-password".to_string(),
        webhook_secret: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_and_find_by_domain(pool: PgPool) {
    let created = BlogRepo::create(&pool, &blog_input("coffee.example"))
        .await
        .unwrap();
    assert!(created.is_active);

    let found = BlogRepo::find_by_domain(&pool, "coffee.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_domain_violates_unique_constraint(pool: PgPool) {
    BlogRepo::create(&pool, &blog_input("coffee.example"))
        .await
        .unwrap();

    let err = BlogRepo::create(&pool, &blog_input("coffee.example"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_blogs_domain"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn disabled_blogs_are_hidden_by_default(pool: PgPool) {
    let active = BlogRepo::create(&pool, &blog_input("active.example"))
        .await
        .unwrap();
    let disabled = BlogRepo::create(&pool, &blog_input("disabled.example"))
        .await
        .unwrap();
    BlogRepo::set_active(&pool, disabled.id, false).await.unwrap();

    let visible = BlogRepo::list(&pool, false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, active.id);

    let all = BlogRepo::list(&pool, true).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_keeps_absent_fields(pool: PgPool) {
    let blog = BlogRepo::create(&pool, &blog_input("coffee.example"))
        .await
        .unwrap();

    let updated = BlogRepo::update(
        &pool,
        blog.id,
        &UpdateBlog {
            name: Some("Renamed".to_string()),
            domain: None,
            niche: None,
            description: None,
            is_active: None,
            wp_base_url: None,
            wp_username: None,
            wp_app_password: None,
            webhook_secret: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.domain, "coffee.example");
    assert_eq!(updated.wp_username, "editor");
}
