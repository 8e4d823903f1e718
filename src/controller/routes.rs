use actix_web::{Resource, web};

use super::crud;
use crate::forms::ModelForm;
use crate::model::{Entity, Product, Shipment};
use crate::storage::{Repository, SqlStorage};
use crate::view::Templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Shipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
}

impl Action {
    /// Read-only operations answer GET; the others render on GET and write on POST.
    #[must_use]
    pub fn verbs(self) -> &'static [Verb] {
        match self {
            Action::List | Action::Detail => &[Verb::Get],
            Action::Create | Action::Update | Action::Delete => &[Verb::Get, Verb::Post],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    /// Path relative to the namespace prefix. `{pk}` marks the integer key.
    pub pattern: &'static str,
    pub entity: EntityKind,
    pub action: Action,
}

impl Route {
    /// The pattern as registered with actix: `{pk}` only matches digits.
    #[must_use]
    pub fn resource_pattern(&self) -> String {
        self.pattern.replace("{pk}", r"{pk:\d+}")
    }

    #[must_use]
    pub fn takes_pk(&self) -> bool {
        self.pattern.contains("{pk}")
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        name: Product::ROUTES.list,
        pattern: "/",
        entity: EntityKind::Product,
        action: Action::List,
    },
    Route {
        name: Product::ROUTES.create,
        pattern: "/producto/nuevo/",
        entity: EntityKind::Product,
        action: Action::Create,
    },
    Route {
        name: Product::ROUTES.detail,
        pattern: "/producto/{pk}/",
        entity: EntityKind::Product,
        action: Action::Detail,
    },
    Route {
        name: Product::ROUTES.update,
        pattern: "/producto/{pk}/editar/",
        entity: EntityKind::Product,
        action: Action::Update,
    },
    Route {
        name: Product::ROUTES.delete,
        pattern: "/producto/{pk}/eliminar/",
        entity: EntityKind::Product,
        action: Action::Delete,
    },
    Route {
        name: Shipment::ROUTES.list,
        pattern: "/embarques/",
        entity: EntityKind::Shipment,
        action: Action::List,
    },
    Route {
        name: Shipment::ROUTES.create,
        pattern: "/embarques/nuevo/",
        entity: EntityKind::Shipment,
        action: Action::Create,
    },
    Route {
        name: Shipment::ROUTES.detail,
        pattern: "/embarques/{pk}/",
        entity: EntityKind::Shipment,
        action: Action::Detail,
    },
    Route {
        name: Shipment::ROUTES.update,
        pattern: "/embarques/{pk}/editar/",
        entity: EntityKind::Shipment,
        action: Action::Update,
    },
    Route {
        name: Shipment::ROUTES.delete,
        pattern: "/embarques/{pk}/eliminar/",
        entity: EntityKind::Shipment,
        action: Action::Delete,
    },
];

#[must_use]
pub fn find(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Builds URLs from route names under the namespace prefix.
#[derive(Debug, Clone, Default)]
pub struct Urls {
    prefix: String,
}

impl Urls {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// URL for the named route. `pk` fills the key segment of single-record
    /// routes and is ignored by the others.
    ///
    /// An unknown name is a programming error; it is logged and resolves to
    /// the namespace root.
    #[must_use]
    pub fn reverse(&self, name: &str, pk: Option<i64>) -> String {
        let Some(route) = find(name) else {
            tracing::error!(name, "no route with this name");
            return format!("{}/", self.prefix);
        };
        let path = match (route.takes_pk(), pk) {
            (true, Some(pk)) => route.pattern.replace("{pk}", &pk.to_string()),
            (true, None) => {
                tracing::error!(name, "route needs a primary key");
                return format!("{}/", self.prefix);
            }
            (false, _) => route.pattern.to_string(),
        };
        format!("{}{path}", self.prefix)
    }

    #[must_use]
    pub fn list<E: Entity>(&self) -> String {
        self.reverse(E::ROUTES.list, None)
    }

    #[must_use]
    pub fn create<E: Entity>(&self) -> String {
        self.reverse(E::ROUTES.create, None)
    }

    #[must_use]
    pub fn detail<E: Entity>(&self, pk: i64) -> String {
        self.reverse(E::ROUTES.detail, Some(pk))
    }

    #[must_use]
    pub fn update<E: Entity>(&self, pk: i64) -> String {
        self.reverse(E::ROUTES.update, Some(pk))
    }

    #[must_use]
    pub fn delete<E: Entity>(&self, pk: i64) -> String {
        self.reverse(E::ROUTES.delete, Some(pk))
    }
}

/// Registers every route of the table, in order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for route in ROUTES {
        let resource = match route.entity {
            EntityKind::Product => resource::<Product>(route),
            EntityKind::Shipment => resource::<Shipment>(route),
        };
        cfg.service(resource);
    }
}

fn resource<E>(route: &Route) -> Resource
where
    E: ModelForm + Templates,
    SqlStorage: Repository<E>,
{
    let resource = web::resource(route.resource_pattern()).name(route.name);
    match route.action {
        Action::List => resource.route(web::get().to(crud::list::<E>)),
        Action::Detail => resource.route(web::get().to(crud::detail::<E>)),
        Action::Create => resource
            .route(web::get().to(crud::create_form::<E>))
            .route(web::post().to(crud::create::<E>)),
        Action::Update => resource
            .route(web::get().to(crud::update_form::<E>))
            .route(web::post().to(crud::update::<E>)),
        Action::Delete => resource
            .route(web::get().to(crud::delete_confirm::<E>))
            .route(web::post().to(crud::delete::<E>)),
    }
}
