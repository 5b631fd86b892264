use std::env;

use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use dotenvy::dotenv;

use pixstock::db::establish_connection_pool;
use pixstock::repository::DieselRepository;
use pixstock::routes::ApiResponse;
use pixstock::routes::categories::{
    add_category, delete_category, get_category, list_categories, update_category,
};
use pixstock::routes::exports::export_products_csv;
use pixstock::routes::favorites::{add_favorite, is_favorite, list_favorites, remove_favorite};
use pixstock::routes::main::{health, not_found};
use pixstock::routes::products::{
    add_product, bulk_delete_products, delete_product, get_product, list_products, update_product,
};
use pixstock::routes::tags::{
    add_tag, assign_tag, get_tag, get_tag_by_name, list_tags, unassign_tag,
};
use pixstock::storage::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_FILE_TOO_LARGE_MESSAGE, DEFAULT_MAX_FILE_SIZE, ImageStore,
    UploadPolicy,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("3000".to_string());
    let port = port.parse::<u16>().unwrap_or(3000);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let upload_dir = env::var("UPLOAD_DIR").unwrap_or("./public/images".to_string());
    let max_file_size = env::var("FILE_MAX_SIZE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE);
    let allowed_extensions =
        env::var("FILE_EXTENSION").unwrap_or(DEFAULT_ALLOWED_EXTENSIONS.to_string());
    let too_large_message =
        env::var("FILE_MAX_MESSAGE").unwrap_or(DEFAULT_FILE_TOO_LARGE_MESSAGE.to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let policy = UploadPolicy::new(max_file_size, &allowed_extensions, too_large_message);
    let store = match ImageStore::new(&upload_dir, policy) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open upload directory {upload_dir}: {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let body = ApiResponse::message_only(err.to_string());
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(body),
                )
                .into()
            }))
            .service(Files::new("/images", store.root()))
            .service(health)
            .service(list_products)
            .service(bulk_delete_products)
            .service(get_product)
            .service(add_product)
            .service(update_product)
            .service(delete_product)
            .service(list_categories)
            .service(get_category)
            .service(add_category)
            .service(update_category)
            .service(delete_category)
            .service(list_tags)
            .service(get_tag_by_name)
            .service(assign_tag)
            .service(unassign_tag)
            .service(get_tag)
            .service(add_tag)
            .service(list_favorites)
            .service(is_favorite)
            .service(add_favorite)
            .service(remove_favorite)
            .service(export_products_csv)
            .default_service(web::route().to(not_found))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
