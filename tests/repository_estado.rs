mod common;

use axioma_docs::AppError;
use axioma_docs::domain::entities::{NewEstado, UpdateEstado};
use axioma_docs::domain::repositories::{EstadoRepository, ListQuery};
use axioma_docs::infrastructure::persistence::PgEstadoRepository;
use common::d;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_seeded_estados(pool: PgPool) {
    let repo = PgEstadoRepository::new(Arc::new(pool));

    let vigente = repo.find_by_nombre("Vigente").await.unwrap().unwrap();
    let vencido = repo.find_by_nombre("Vencido").await.unwrap().unwrap();

    assert_eq!(vigente.nivel, 1);
    assert_eq!(vencido.nivel, 8);
    assert_eq!(repo.count(None).await.unwrap(), 3);
}

#[sqlx::test]
async fn test_create_update_and_search(pool: PgPool) {
    let repo = PgEstadoRepository::new(Arc::new(pool));

    let created = repo
        .create(NewEstado {
            nombre: "En trámite".to_string(),
            descripcion: Some("Renovación iniciada".to_string()),
            color: "#0d6efd".to_string(),
            nivel: 3,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateEstado {
                descripcion: Some(None),
                nivel: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.descripcion, None);
    assert_eq!(updated.nivel, 4);
    assert_eq!(updated.nombre, "En trámite");

    let found = repo
        .list(ListQuery::new(Some("trámite".to_string()), 0, 10))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(repo.count(Some("trámite".to_string())).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_duplicate_nombre_is_conflict(pool: PgPool) {
    let repo = PgEstadoRepository::new(Arc::new(pool));

    let result = repo
        .create(NewEstado {
            nombre: "Vigente".to_string(),
            descripcion: None,
            color: "#000000".to_string(),
            nivel: 2,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_is_referenced(pool: PgPool) {
    let vencido = common::estado_id(&pool, "Vencido").await;
    let vigente = common::estado_id(&pool, "Vigente").await;
    let doc = common::create_test_documentacion(&pool, "ART", 365, 30).await;
    let recurso = common::create_test_recurso(&pool, "R1", "Pérez").await;
    let asignacion = common::assign_to_recurso(&pool, recurso, doc, None).await;
    sqlx::query("UPDATE recurso_documentacion SET estado_id = $1 WHERE id = $2")
        .bind(vencido)
        .bind(asignacion)
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgEstadoRepository::new(Arc::new(pool));

    assert!(repo.is_referenced(vencido).await.unwrap());
    assert!(!repo.is_referenced(vigente).await.unwrap());
}

#[sqlx::test]
async fn test_list_for_entidad_follows_active_links(pool: PgPool) {
    let por_vencer = common::estado_id(&pool, "Por vencer").await;
    let vencido = common::estado_id(&pool, "Vencido").await;
    let doc = common::create_test_documentacion(&pool, "ART", 365, 30).await;
    let entidad = common::create_test_entidad(&pool, "Acme SA").await;
    let activo = common::create_test_recurso(&pool, "R1", "Activo").await;
    let terminado = common::create_test_recurso(&pool, "R2", "Terminado").await;

    common::link(&pool, entidad, activo, d(2024, 1, 1), None).await;
    common::link(&pool, entidad, terminado, d(2024, 1, 1), Some(d(2024, 6, 30))).await;

    for (recurso, estado) in [(activo, por_vencer), (terminado, vencido)] {
        let id = common::assign_to_recurso(&pool, recurso, doc, None).await;
        sqlx::query("UPDATE recurso_documentacion SET estado_id = $1 WHERE id = $2")
            .bind(estado)
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
    }

    let repo = PgEstadoRepository::new(Arc::new(pool));
    let estados = repo.list_for_entidad(entidad, d(2025, 1, 1)).await.unwrap();

    assert_eq!(estados.len(), 1);
    assert_eq!(estados[0].id, por_vencer);
}
