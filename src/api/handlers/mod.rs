//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod archivos;
pub mod asignaciones;
pub mod auth;
pub mod dashboard;
pub mod documentacion;
pub mod entidades;
pub mod estados;
pub mod health;
pub mod recursos;
pub mod usuarios;
pub mod vencimientos;

pub use archivos::{
    archivo_list_handler, delete_archivo_handler, download_archivo_handler, get_archivo_handler,
    upload_archivo_handler,
};
pub use asignaciones::{
    create_entidad_documentacion_handler, create_recurso_documentacion_handler,
    delete_entidad_documentacion_handler, delete_recurso_documentacion_handler,
    entidad_documentacion_handler, recurso_documentacion_handler,
    update_entidad_documentacion_handler, update_recurso_documentacion_handler,
};
pub use auth::{change_password_handler, login_handler, me_handler, register_handler};
pub use dashboard::{
    estados_handler, reporte_entidad_handler, reporte_vencimientos_handler, resumen_handler,
    vencimientos_handler,
};
pub use documentacion::{
    create_documentacion_handler, delete_documentacion_handler, documentacion_list_handler,
    get_documentacion_handler, update_documentacion_handler,
};
pub use entidades::{
    create_entidad_handler, create_vinculo_handler, delete_entidad_handler,
    delete_vinculo_handler, entidad_estado_critico_handler, entidad_list_handler,
    entidad_recursos_handler, get_entidad_handler, update_entidad_handler,
    update_vinculo_handler,
};
pub use estados::{
    create_estado_handler, delete_estado_handler, estado_list_handler, get_estado_handler,
    update_estado_handler,
};
pub use health::health_handler;
pub use recursos::{
    create_recurso_handler, delete_recurso_handler, get_recurso_handler, recurso_entidades_handler,
    recurso_estado_critico_handler, recurso_list_handler, update_recurso_handler,
};
pub use usuarios::{
    create_usuario_handler, delete_usuario_handler, get_usuario_handler, update_usuario_handler,
    usuario_list_handler,
};
pub use vencimientos::recalcular_handler;
