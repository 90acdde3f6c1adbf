use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use pokerclubs_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::AssistantAPI,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    tasks,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建JWT服务
    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    // 创建外部服务
    let assistant_api = AssistantAPI::new(config.assistant.clone());

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let permission_service = PermissionService::new(pool.clone());
    let club_service = ClubService::new(pool.clone());
    let member_service = MemberService::new(pool.clone());
    let tournament_service = TournamentService::new(pool.clone());
    let store_service = StoreService::new(pool.clone());
    let transaction_service = TransactionService::new(pool.clone());
    let assistant_service = AssistantService::new(assistant_api, tournament_service.clone());

    // 启动后台任务 (赛事状态推进)
    tasks::spawn_all(tournament_service.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(permission_service.clone()))
            .app_data(web::Data::new(club_service.clone()))
            .app_data(web::Data::new(member_service.clone()))
            .app_data(web::Data::new(tournament_service.clone()))
            .app_data(web::Data::new(store_service.clone()))
            .app_data(web::Data::new(transaction_service.clone()))
            .app_data(web::Data::new(assistant_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::club_config)
                    .configure(handlers::member_config)
                    .configure(handlers::store_config)
                    .configure(handlers::tournament_config)
                    .configure(handlers::transaction_config)
                    .configure(handlers::assistant_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
