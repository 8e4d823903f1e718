use actix_web::http::StatusCode;
use actix_web::{App, test};

use productos::app_config;
use productos::model::Product;
use productos::storage::{Repository, SqlStorage};

mod common;
use common::{attrs, location, read_html, setup_test_context, texts};

#[actix_web::test]
async fn test_list_shows_products_with_their_shipments() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;

    assert_eq!(attrs(&doc, "#productos tbody tr", "data-id"), vec!["1", "2", "3"]);
    assert_eq!(
        texts(&doc, "#productos tbody td.nombre"),
        vec!["Tornillo", "Tuerca", "Arandela"]
    );
    assert_eq!(texts(&doc, "#productos tbody td.precio"), vec!["1.50", "0.75", "0.20"]);
    assert_eq!(
        texts(&doc, "#productos tbody td.related"),
        vec!["EMB-001", "EMB-001, EMB-002", ""]
    );
    assert_eq!(
        attrs(&doc, "tr[data-id='2'] td.related a", "href"),
        vec!["/embarques/1/", "/embarques/2/"]
    );
    Ok(())
}

#[actix_web::test]
async fn test_empty_list_renders() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context("").await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(texts(&doc, "p.empty"), vec!["No hay productos registrados."]);
    assert!(texts(&doc, "#productos").is_empty());
    Ok(())
}

#[actix_web::test]
async fn test_detail_lists_shipments() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/producto/2/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(texts(&doc, "h1"), vec!["Tuerca"]);
    assert_eq!(texts(&doc, "dd.precio"), vec!["0.75"]);
    assert_eq!(attrs(&doc, "ul.related li", "data-id"), vec!["1", "2"]);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/producto/3/").to_request()).await;
    let doc = read_html(resp).await;
    assert_eq!(texts(&doc, "p.empty"), vec!["Este producto no está en ningún embarque."]);
    Ok(())
}

#[actix_web::test]
async fn test_create_valid_redirects_to_list() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/producto/nuevo/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(attrs(&doc, "form[method='post']", "action"), vec!["/producto/nuevo/"]);
    assert_eq!(attrs(&doc, "form [name]", "name"), vec!["nombre", "descripcion", "precio"]);

    let req = test::TestRequest::post()
        .uri("/producto/nuevo/")
        .set_form([("nombre", "Clavo"), ("descripcion", "Clavo de 2 pulgadas"), ("precio", "12,5")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    assert_eq!(ctx.storage.count_rows("producto").await?, 4);
    let created = <SqlStorage as Repository<Product>>::get_with_related(&ctx.storage, 4)
        .await?
        .expect("new product should exist");
    assert_eq!(created.record.nombre, "Clavo");
    assert_eq!(created.record.descripcion, "Clavo de 2 pulgadas");
    assert_eq!(created.record.precio.cents(), 1250);
    assert!(created.related.is_empty());
    Ok(())
}

#[actix_web::test]
async fn test_create_invalid_rerenders_with_errors() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let req = test::TestRequest::post()
        .uri("/producto/nuevo/")
        .set_form([("nombre", "   "), ("descripcion", "algo"), ("precio", "1.234")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;

    assert_eq!(texts(&doc, "p.errornote").len(), 1);
    assert_eq!(texts(&doc, "ul.errorlist li").len(), 2);
    assert_eq!(
        texts(&doc, "ul.errorlist li")[0],
        "Este campo es obligatorio."
    );
    // submitted values survive the round-trip
    assert_eq!(attrs(&doc, "input[name='precio']", "value"), vec!["1.234"]);
    assert_eq!(texts(&doc, "textarea[name='descripcion']"), vec!["algo"]);

    assert_eq!(ctx.storage.count_rows("producto").await?, 3);

    let long_name = "x".repeat(101);
    let req = test::TestRequest::post()
        .uri("/producto/nuevo/")
        .set_form([("nombre", long_name.as_str()), ("precio", "1")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(texts(&doc, "ul.errorlist li").len(), 1);
    assert_eq!(ctx.storage.count_rows("producto").await?, 3);
    Ok(())
}

#[actix_web::test]
async fn test_update_changes_only_target() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/producto/2/editar/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(attrs(&doc, "input[name='nombre']", "value"), vec!["Tuerca"]);
    assert_eq!(attrs(&doc, "input[name='precio']", "value"), vec!["0.75"]);

    let req = test::TestRequest::post()
        .uri("/producto/2/editar/")
        .set_form([("nombre", "Tuerca hexagonal"), ("descripcion", ""), ("precio", "0.80")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    let all = <SqlStorage as Repository<Product>>::list_with_related(&ctx.storage).await?;
    let names: Vec<&str> = all.iter().map(|p| p.record.nombre.as_str()).collect();
    assert_eq!(names, vec!["Tornillo", "Tuerca hexagonal", "Arandela"]);
    assert_eq!(all[1].record.precio.cents(), 80);
    assert_eq!(all[0].record.precio.cents(), 150);
    // shipments are not touched by the product form
    assert_eq!(all[1].related.len(), 2);
    Ok(())
}

#[actix_web::test]
async fn test_update_invalid_rerenders_and_keeps_row() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let req = test::TestRequest::post()
        .uri("/producto/2/editar/")
        .set_form([("nombre", "   "), ("descripcion", "otra"), ("precio", "9.99")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(texts(&doc, "ul.errorlist li"), vec!["Este campo es obligatorio."]);
    assert_eq!(attrs(&doc, "form[method='post']", "action"), vec!["/producto/2/editar/"]);
    assert_eq!(attrs(&doc, "input[name='precio']", "value"), vec!["9.99"]);

    let stored = <SqlStorage as Repository<Product>>::get_with_related(&ctx.storage, 2)
        .await?
        .expect("product should exist");
    assert_eq!(stored.record.nombre, "Tuerca");
    assert_eq!(stored.record.descripcion, "");
    assert_eq!(stored.record.precio.cents(), 75);
    assert_eq!(stored.related.len(), 2);
    Ok(())
}

#[actix_web::test]
async fn test_unknown_pk_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    for uri in [
        "/producto/999/",
        "/producto/999/editar/",
        "/producto/999/eliminar/",
        "/producto/99999999999999999999/",
        "/producto/abc/",
        "/no/existe/",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }

    let req = test::TestRequest::post()
        .uri("/producto/999/editar/")
        .set_form([("nombre", "Nada"), ("precio", "1")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let doc = read_html(resp).await;
    assert_eq!(texts(&doc, "h1"), vec!["No encontrado"]);

    let req = test::TestRequest::post().uri("/producto/999/eliminar/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(ctx.storage.count_rows("producto").await?, 3);
    Ok(())
}

#[actix_web::test]
async fn test_wrong_method_is_405() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let req = test::TestRequest::post().uri("/producto/1/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[actix_web::test]
async fn test_delete_removes_product_and_links() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context(include_str!("test1.sql")).await?;
    let app = test::init_service(App::new().configure(app_config(ctx.storage.clone(), String::new()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/producto/1/eliminar/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_html(resp).await;
    assert_eq!(attrs(&doc, "form[method='post']", "action"), vec!["/producto/1/eliminar/"]);
    // confirming does not delete
    assert_eq!(ctx.storage.count_rows("producto").await?, 3);

    let req = test::TestRequest::post().uri("/producto/1/eliminar/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    assert_eq!(ctx.storage.count_rows("producto").await?, 2);
    assert_eq!(ctx.storage.count_rows("embarque").await?, 2);
    assert_eq!(ctx.storage.count_rows("embarque_productos").await?, 2);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/embarques/1/").to_request()).await;
    let doc = read_html(resp).await;
    assert_eq!(attrs(&doc, "ul.related li", "data-id"), vec!["2"]);
    Ok(())
}
