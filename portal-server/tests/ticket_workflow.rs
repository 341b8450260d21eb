//! Ticket lifecycle and role scoping against an in-memory store
//! Run: cargo test -p portal-server --test ticket_workflow

use portal_server::db::DbService;
use portal_server::db::models::{
    IncidentType, Priority, Registration, RegistrationStatus, Role, Ticket, TicketStatus,
    UNASSIGNED,
};
use portal_server::db::repository::{
    RegistrationRepository, RepoError, RoleMapRepository, TicketRepository, TicketScope,
};

fn new_ticket(email: &str, assigned_to: &str, created_at: i64) -> Ticket {
    Ticket {
        id: None,
        name: "Escuela Simón Bolívar".into(),
        email: email.into(),
        institucion: "Escuela Simón Bolívar".into(),
        ciudad: "Quito".into(),
        tipo_incidente: IncidentType::AtascoDePapel,
        description: "El equipo atasca el papel en la bandeja 2".into(),
        status: TicketStatus::Abierto,
        priority: Priority::Media,
        assigned_to: assigned_to.into(),
        created_at,
        rev: 0,
        resolved_at: None,
        resolved_by: None,
        resolution_details: None,
        resolution_parts: None,
        pending_activities: None,
        observations: None,
    }
}

#[tokio::test]
async fn technician_scope_only_sees_own_assignments() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db);

    repo.create(new_ticket("a@x.ec", "Ana", 1000)).await.unwrap();
    repo.create(new_ticket("b@x.ec", "Ana", 3000)).await.unwrap();
    repo.create(new_ticket("c@x.ec", "Luis", 2000)).await.unwrap();
    repo.create(new_ticket("d@x.ec", UNASSIGNED, 4000)).await.unwrap();

    let ana = repo
        .find_scoped(&TicketScope::AssignedTo("Ana".into()))
        .await
        .unwrap();
    assert_eq!(ana.len(), 2);
    assert!(ana.iter().all(|t| t.assigned_to == "Ana"));
    // Newest first
    assert!(ana[0].created_at > ana[1].created_at);

    let luis = repo
        .find_scoped(&TicketScope::AssignedTo("Luis".into()))
        .await
        .unwrap();
    assert_eq!(luis.len(), 1);
    assert_eq!(luis[0].email, "c@x.ec");

    let all = repo.find_scoped(&TicketScope::All).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].created_at, 4000);

    let owner = repo
        .find_scoped(&TicketScope::OwnedBy("a@x.ec".into()))
        .await
        .unwrap();
    assert_eq!(owner.len(), 1);
}

#[tokio::test]
async fn assign_moves_ticket_to_en_progreso() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db);

    let ticket = repo
        .create(new_ticket("a@x.ec", UNASSIGNED, 1000))
        .await
        .unwrap();
    let id = ticket.id.as_ref().unwrap().to_string();

    let assigned = repo.assign(&id, "Carlos Vera", None).await.unwrap();
    assert_eq!(assigned.status, TicketStatus::EnProgreso);
    assert_eq!(assigned.assigned_to, "Carlos Vera");
    assert_eq!(assigned.rev, 1);
}

#[tokio::test]
async fn stale_revision_is_rejected() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db);

    let ticket = repo
        .create(new_ticket("a@x.ec", UNASSIGNED, 1000))
        .await
        .unwrap();
    let id = ticket.id.as_ref().unwrap().to_string();

    // First writer wins
    repo.assign(&id, "Ana", Some(0)).await.unwrap();

    // Second writer saw rev 0 as well; its update is refused
    let err = repo.assign(&id, "Luis", Some(0)).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let current = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(current.assigned_to, "Ana");

    // Without an expected rev the write goes through (legacy behavior)
    let overwritten = repo.assign(&id, "Luis", None).await.unwrap();
    assert_eq!(overwritten.assigned_to, "Luis");
}

#[tokio::test]
async fn resolve_stamps_report_fields() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db);

    let ticket = repo
        .create(new_ticket("a@x.ec", "Ana", 1000))
        .await
        .unwrap();
    let id = ticket.id.as_ref().unwrap().to_string();

    let resolved = repo
        .resolve(
            &id,
            "Ana",
            "Se limpiaron los rodillos y se reemplazó el kit de arrastre",
            Some("Kit de arrastre MK-1150".into()),
            None,
            Some("Se recomienda cambio de toner pronto".into()),
            None,
        )
        .await
        .unwrap();

    assert_eq!(resolved.status, TicketStatus::Resuelto);
    assert_eq!(resolved.resolved_by.as_deref(), Some("Ana"));
    assert!(resolved.resolved_at.is_some());
    assert!(resolved.resolution_details.is_some());
    assert_eq!(
        resolved.observations.as_deref(),
        Some("Se recomienda cambio de toner pronto")
    );
}

#[tokio::test]
async fn mutations_on_missing_ticket_are_not_found() {
    let db = DbService::memory().await.unwrap().db;
    let repo = TicketRepository::new(db);

    let err = repo
        .set_status("ticket:nope", TicketStatus::EnEspera, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn legacy_record_without_status_reads_as_abierto() {
    let service = DbService::memory().await.unwrap();

    // Record written before the dashboard enforced defaults
    service
        .db
        .query(
            r#"CREATE ticket SET
                name = 'Hospital del Día',
                email = 'ti@hospital.ec',
                institucion = 'Hospital del Día',
                ciudad = 'Ambato',
                tipo_incidente = 'Consumibles',
                description = 'Toner agotado en impresora principal',
                created_at = 1000"#,
        )
        .await
        .unwrap();

    let repo = TicketRepository::new(service.db);
    let tickets = repo.find_scoped(&TicketScope::All).await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].status, TicketStatus::Abierto);
    assert_eq!(tickets[0].priority, Priority::Media);
    assert_eq!(tickets[0].assigned_to, UNASSIGNED);
}

#[tokio::test]
async fn on_disk_store_persists_tickets() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::open(tmp.path()).await.unwrap().db;
    let repo = TicketRepository::new(db);

    let created = repo
        .create(new_ticket("a@x.ec", UNASSIGNED, 1000))
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_string();

    let read_back = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(read_back.email, "a@x.ec");
    assert_eq!(read_back.status, TicketStatus::Abierto);
}

#[tokio::test]
async fn role_map_assign_and_remove() {
    let db = DbService::memory().await.unwrap().db;
    let roles = RoleMapRepository::new(db.clone());

    assert!(roles.get().await.unwrap().roles.is_empty());

    roles.assign("u1", Role::Technician).await.unwrap();
    roles.assign("u2", Role::Client).await.unwrap();
    assert_eq!(roles.role_of("u1").await.unwrap(), Some(Role::Technician));
    assert_eq!(roles.role_of("u2").await.unwrap(), Some(Role::Client));

    // Reassignment overwrites
    roles.assign("u2", Role::Admin).await.unwrap();
    assert_eq!(roles.role_of("u2").await.unwrap(), Some(Role::Admin));

    roles.remove("u1").await.unwrap();
    assert_eq!(roles.role_of("u1").await.unwrap(), None);
    assert_eq!(roles.entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn role_assignment_marks_registration_approved() {
    let db = DbService::memory().await.unwrap().db;
    let registrations = RegistrationRepository::new(db.clone());

    registrations
        .create(Registration {
            id: None,
            uid: "u9".into(),
            name: "María Torres".into(),
            email: "maria@empresa.ec".into(),
            company: "Empresa SA".into(),
            ruc: "1790012345001".into(),
            phone: "0998765432".into(),
            status: RegistrationStatus::Pending,
            created_at: 1000,
        })
        .await
        .unwrap();

    assert_eq!(registrations.find_pending().await.unwrap().len(), 1);

    let updated = registrations.approve_by_uid("u9").await.unwrap().unwrap();
    assert_eq!(updated.status, RegistrationStatus::Approved);
    assert!(registrations.find_pending().await.unwrap().is_empty());

    // No matching registration is not an error
    assert!(registrations.approve_by_uid("nobody").await.unwrap().is_none());
}
