//! End-to-end conformance run over a layered catalog service graph.

use conform::dsl::{classes, interfaces, method_members, types};
use conform::{loader, ConfigError, Evaluator, GraphModel, RuleStatus};

/// Symbol graph of a small layered catalog API: domain entities and
/// interfaces, application handlers and DTOs, a controller, and an
/// EF-backed repository.
const CATALOG_GRAPH: &str = r#"{
    "symbols": [
        {"name": "Catalog.Api.Domain.Entities.Product", "kind": "class"},
        {"name": "Catalog.Api.Domain.DomainObjects.BaseEntity", "kind": "class", "abstract": true},
        {"name": "Catalog.Api.Domain.Interfaces.IProductRepository", "kind": "interface"},
        {"name": "Catalog.Api.Common.IRequestHandler", "kind": "interface"},
        {"name": "Catalog.Api.Application.DTO.ProductDto", "kind": "class", "record": true},
        {"name": "Catalog.Api.Application.Messages.Commands.ProductCommandHandler", "kind": "class"},
        {"name": "Catalog.Api.Application.Messages.Queries.ProductQueryHandler", "kind": "class"},
        {"name": "Catalog.Api.Infrastructure.Repositories.ProductRepository", "kind": "class"},
        {"name": "Catalog.Api.Infrastructure.Repositories.ProductRepository.GetAllAsync",
         "kind": "method", "returns": "Task<IEnumerable<Product>>"},
        {"name": "Catalog.Api.Controllers.ProductController", "kind": "class"},
        {"name": "Catalog.Api.Controllers.ProductController.GetProducts",
         "kind": "method", "returns": "Task<IActionResult>"},
        {"name": "Catalog.Api.Controllers.ProductController.ProductController",
         "kind": "method", "constructor": true}
    ],
    "edges": [
        {"from": "Catalog.Api.Domain.Entities.Product",
         "to": "Catalog.Api.Domain.DomainObjects.BaseEntity", "kind": "inherits"},
        {"from": "Catalog.Api.Domain.Interfaces.IProductRepository",
         "to": "Catalog.Api.Domain.Entities.Product", "kind": "uses"},
        {"from": "Catalog.Api.Application.Messages.Commands.ProductCommandHandler",
         "to": "Catalog.Api.Common.IRequestHandler", "kind": "implements"},
        {"from": "Catalog.Api.Application.Messages.Queries.ProductQueryHandler",
         "to": "Catalog.Api.Common.IRequestHandler", "kind": "implements"},
        {"from": "Catalog.Api.Application.Messages.Commands.ProductCommandHandler",
         "to": "Catalog.Api.Domain.Interfaces.IProductRepository", "kind": "uses"},
        {"from": "Catalog.Api.Application.Messages.Queries.ProductQueryHandler",
         "to": "Catalog.Api.Domain.Interfaces.IProductRepository", "kind": "uses"},
        {"from": "Catalog.Api.Application.DTO.ProductDto",
         "to": "Catalog.Api.Domain.Entities.Product", "kind": "uses"},
        {"from": "Catalog.Api.Infrastructure.Repositories.ProductRepository",
         "to": "Catalog.Api.Domain.Interfaces.IProductRepository", "kind": "implements"},
        {"from": "Catalog.Api.Infrastructure.Repositories.ProductRepository",
         "to": "Catalog.Api.Domain.Entities.Product", "kind": "uses"},
        {"from": "Catalog.Api.Infrastructure.Repositories.ProductRepository",
         "to": "Catalog.Api.Infrastructure.Repositories.ProductRepository.GetAllAsync",
         "kind": "declares"},
        {"from": "Catalog.Api.Controllers.ProductController",
         "to": "Catalog.Api.Application.Messages.Queries.ProductQueryHandler", "kind": "uses"},
        {"from": "Catalog.Api.Controllers.ProductController",
         "to": "Catalog.Api.Controllers.ProductController.GetProducts", "kind": "declares"},
        {"from": "Catalog.Api.Controllers.ProductController",
         "to": "Catalog.Api.Controllers.ProductController.ProductController", "kind": "declares"}
    ]
}"#;

fn catalog() -> GraphModel {
    loader::from_json_str(CATALOG_GRAPH).expect("catalog graph is consistent")
}

#[test]
fn layer_dependencies_hold() -> Result<(), ConfigError> {
    let graph = catalog();

    let domain = types()
        .that()
        .reside_in_namespace("Catalog.Api.Domain.*")?
        .as_selection("domain");
    let application = types()
        .that()
        .reside_in_namespace("Catalog.Api.Application.*")?
        .as_selection("application");
    let controllers = types()
        .that()
        .reside_in_namespace("Catalog.Api.Controllers.*")?
        .as_selection("controllers");
    let infrastructure = types()
        .that()
        .reside_in_namespace("Catalog.Api.Infrastructure.*")?
        .as_selection("infrastructure");

    let rules = types()
        .that()
        .reside_in_namespace("Catalog.Api.Domain.*")?
        .should()
        .only_depend_on(&domain)
        .build("domain-only-depends-on-domain")?
        .and(
            types()
                .that()
                .reside_in_namespace("Catalog.Api.Infrastructure.*")?
                .should()
                .not_depend_on_any(&application)
                .build("infrastructure-avoids-application")?,
        )
        .and(
            types()
                .that()
                .reside_in_namespace("Catalog.Api.Application.*")?
                .should()
                .not_depend_on_any(&controllers)
                .build("application-avoids-controllers")?,
        )
        .and(
            types()
                .that()
                .reside_in_namespace("Catalog.Api.Controllers.*")?
                .should()
                .not_depend_on_any(&infrastructure)
                .build("controllers-avoid-infrastructure")?,
        );

    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
    Ok(())
}

#[test]
fn repositories_implement_domain_interfaces() -> Result<(), ConfigError> {
    let graph = catalog();
    let rules = types()
        .that()
        .reside_in_namespace("Catalog.Api.Infrastructure.Repositories.*")?
        .and()
        .have_name_matching(".*Repository")?
        .should()
        .implement_interface_in("Catalog.Api.Domain.Interfaces.*")?
        .build("repositories-implement-interfaces")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
    Ok(())
}

#[test]
fn handlers_are_suffixed_command_or_query_handler() -> Result<(), ConfigError> {
    let graph = catalog();
    let rules = classes()
        .that()
        .implement_interface("Catalog.Api.Common.IRequestHandler")
        .should()
        .have_name_ending_with("CommandHandler")?
        .or_should()
        .have_name_ending_with("QueryHandler")?
        .build("handler-naming")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
    Ok(())
}

#[test]
fn dtos_are_record_like() -> Result<(), ConfigError> {
    let graph = catalog();
    let rules = classes()
        .that()
        .reside_in_namespace("Catalog.Api.Application.DTO.*")?
        .should()
        .be_record_like()
        .build("dtos-are-records")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
    Ok(())
}

#[test]
fn controller_actions_return_the_action_wrapper() -> Result<(), ConfigError> {
    let graph = catalog();
    let controllers = types()
        .that()
        .reside_in_namespace("Catalog.Api.Controllers.*")?
        .as_selection("controllers");

    let rules = method_members()
        .that()
        .are_public()
        .and()
        .are_no_constructors()
        .and()
        .are_declared_in(&controllers)
        .should()
        .have_return_type("Task<IActionResult>")?
        .build("controller-actions-return-wrapper")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
    Ok(())
}

#[test]
fn interfaces_start_with_i() -> Result<(), ConfigError> {
    let graph = catalog();
    let rules = interfaces()
        .should()
        .have_name_matching("I[A-Z].*")?
        .build("interface-naming")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
    Ok(())
}

#[test]
fn leaking_domain_dependency_is_reported_per_edge() -> Result<(), ConfigError> {
    let graph = loader::from_json_str(
        r#"{
            "symbols": [
                {"name": "Domain.Order", "kind": "class"},
                {"name": "Infrastructure.OrderRepository", "kind": "class"}
            ],
            "edges": [
                {"from": "Domain.Order", "to": "Infrastructure.OrderRepository", "kind": "uses"}
            ]
        }"#,
    )
    .expect("consistent graph");

    let domain = types()
        .that()
        .reside_in_namespace("Domain.*")?
        .as_selection("domain");
    let rules = types()
        .that()
        .reside_in_namespace("Domain.*")?
        .should()
        .only_depend_on(&domain)
        .build("domain-isolation")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(!report.passed());
    assert_eq!(report.exit_code(), 1);

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, RuleStatus::Failed);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.violations[0].symbol, "Domain.Order");
    assert_eq!(
        outcome.violations[0].reason,
        "depends on Infrastructure.OrderRepository"
    );
    Ok(())
}

#[test]
fn get_methods_must_not_return_void() -> Result<(), ConfigError> {
    let graph = loader::from_json_str(
        r#"{
            "symbols": [
                {"name": "Controllers.OrderController", "kind": "class"},
                {"name": "Controllers.OrderController.GetOrder",
                 "kind": "method", "returns": "void"}
            ],
            "edges": [
                {"from": "Controllers.OrderController",
                 "to": "Controllers.OrderController.GetOrder", "kind": "declares"}
            ]
        }"#,
    )
    .expect("consistent graph");

    let rules = method_members()
        .that()
        .have_name_matching("Get[A-Z].*")?
        .should()
        .not_have_return_type("void")?
        .build("getters-return-something")?
        .into();

    let report = Evaluator::new(&graph).run(&rules);
    assert!(!report.passed());
    assert_eq!(
        report.outcomes[0].violations[0].symbol,
        "Controllers.OrderController.GetOrder"
    );
    Ok(())
}

#[test]
fn declarative_config_drives_the_same_run() {
    let graph = catalog();
    let config = r#"
[[selections]]
name = "domain"
namespace = "Catalog.Api.Domain.*"

[[selections]]
name = "infrastructure"
namespace = "Catalog.Api.Infrastructure.*"

[[rules]]
name = "domain-isolation"
subject = "domain"
only-depend-on = ["domain"]

[[rules]]
name = "controllers-avoid-infrastructure"
subject-namespace = "Catalog.Api.Controllers.*"
not-depend-on-any = ["infrastructure"]

[[rules]]
name = "dtos-are-records"
subject-namespace = "Catalog.Api.Application.DTO.*"
record-like = true
"#;
    let rules = conform::declarative::load_rules_from_toml(config).expect("valid config");
    let report = Evaluator::new(&graph).run(&rules);
    assert!(report.passed(), "{}", report.format_text());
}

#[test]
fn malformed_rule_pattern_never_reaches_evaluation() {
    // Invalid regex fails at construction, not at evaluation.
    let result = method_members().that().have_name_matching("[");
    assert!(matches!(result, Err(ConfigError::InvalidRegex { .. })));
}
