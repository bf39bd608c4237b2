// OpenAPI document served by Swagger UI
use utoipa::OpenApi;
use crate::domains::auth::models::*;
use crate::domains::calculation::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::auth::handlers::auth_handler::register,
        crate::domains::auth::handlers::auth_handler::login,
        crate::domains::auth::handlers::auth_handler::refresh,
        crate::domains::auth::handlers::auth_handler::logout,
        crate::domains::auth::handlers::auth_handler::get_me,
        crate::domains::auth::handlers::auth_handler::change_password,
        crate::domains::calculation::handlers::calculation_handler::create_calculation,
        crate::domains::calculation::handlers::calculation_handler::list_calculations,
        crate::domains::calculation::handlers::calculation_handler::get_calculation,
        crate::domains::calculation::handlers::calculation_handler::update_calculation,
        crate::domains::calculation::handlers::calculation_handler::delete_calculation
    ),
    components(schemas(
        UserCreate,
        UserLogin,
        PasswordUpdate,
        TokenResponse,
        TokenType,
        RefreshTokenRequest,
        LogoutRequest,
        MessageResponse,
        UserResponse,
        Calculation,
        CalculationType,
        CalculationCreate,
        CalculationUpdate
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Registration, login and token management"),
        (name = "Calculations", description = "Calculation history of the current user")
    ),
    info(
        title = "Calculator API",
        description = "Calculator with user accounts and JWT authentication",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Adds the "Authorize" button to Swagger UI
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
