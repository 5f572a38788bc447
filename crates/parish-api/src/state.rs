//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use parish_core::config::AppConfig;
use parish_core::traits::Clock;
use parish_database::{
    DatabasePool, MassTypeRepository, MassTypeStore, MemoryStore, ReservationRepository,
    ReservationStore, SlotRepository, SlotStore,
};
use parish_service::{
    AvailabilityResolver, BookingEngine, CatalogService, ReservationNotifier, ReservationService,
};

/// The three stores the services are built from.
#[derive(Clone)]
pub struct Stores {
    /// Slot catalog.
    pub slots: Arc<dyn SlotStore>,
    /// Mass type catalog.
    pub mass_types: Arc<dyn MassTypeStore>,
    /// Reservations.
    pub reservations: Arc<dyn ReservationStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            slots: Arc::new(SlotRepository::new(pool.clone())),
            mass_types: Arc::new(MassTypeRepository::new(pool.clone())),
            reservations: Arc::new(ReservationRepository::new(pool)),
        }
    }

    /// A single in-process store behind all three traits.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            slots: store.clone(),
            mass_types: store.clone(),
            reservations: store,
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on the in-process store
    pub db: Option<DatabasePool>,
    /// Per-date availability
    pub availability: Arc<AvailabilityResolver>,
    /// Reservation intake
    pub booking: Arc<BookingEngine>,
    /// Staff-side reservation lifecycle
    pub reservations: Arc<ReservationService>,
    /// Slot and mass type maintenance
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Wire the services over the given stores.
    pub fn new(
        config: AppConfig,
        db: Option<DatabasePool>,
        stores: Stores,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ReservationNotifier>,
    ) -> Self {
        let availability = AvailabilityResolver::new(
            Arc::clone(&stores.slots),
            Arc::clone(&stores.reservations),
        );
        let booking = BookingEngine::new(
            Arc::clone(&stores.reservations),
            notifier,
            Arc::clone(&clock),
            config.booking.clone(),
        );
        let reservations = ReservationService::new(Arc::clone(&stores.reservations), clock);
        let catalog = CatalogService::new(stores.slots, stores.mass_types);

        Self {
            config: Arc::new(config),
            db,
            availability: Arc::new(availability),
            booking: Arc::new(booking),
            reservations: Arc::new(reservations),
            catalog: Arc::new(catalog),
        }
    }
}
