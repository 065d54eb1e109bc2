use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::dashboard::model::DashboardResponse;
use crate::modules::invoices::model::{Invoice, InvoiceFilterParams, PaginatedInvoicesResponse};
use crate::modules::members::model::{
    AddMemberDto, ChangeRoleDto, MemberFilterParams, MemberSummary, PaginatedMembersResponse,
};
use crate::modules::roles::model::{
    CreateRoleDto, GrantPermissionsDto, PaginatedRolesResponse, RoleFilterParams, UpdateFlagsDto,
};
use crate::modules::schools::model::{SelectSchoolDto, SelectSchoolResponse};
use crate::modules::staff::model::{PaginatedStaffResponse, StaffFilterParams, StaffMember};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams,
};
use schoolhouse_core::capabilities::Capability;
use schoolhouse_core::{PaginationMeta, PaginationParams};
use schoolhouse_models::roles::CapabilityFlags;
use schoolhouse_models::{Membership, Role, School, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::schools::controller::get_my_schools,
        crate::modules::schools::controller::select_school,
        crate::modules::schools::controller::get_current_school,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::grant_permissions,
        crate::modules::roles::controller::revoke_permission,
        crate::modules::roles::controller::update_flags,
        crate::modules::roles::controller::delete_role,
        crate::modules::members::controller::get_members,
        crate::modules::members::controller::add_member,
        crate::modules::members::controller::change_member_role,
        crate::modules::members::controller::remove_member,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student,
        crate::modules::staff::controller::get_staff,
        crate::modules::staff::controller::get_staff_member,
        crate::modules::invoices::controller::get_invoices,
        crate::modules::invoices::controller::get_invoice,
    ),
    components(
        schemas(
            User,
            School,
            Role,
            Membership,
            Capability,
            CapabilityFlags,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            SelectSchoolDto,
            SelectSchoolResponse,
            DashboardResponse,
            CreateRoleDto,
            GrantPermissionsDto,
            UpdateFlagsDto,
            RoleFilterParams,
            PaginatedRolesResponse,
            AddMemberDto,
            ChangeRoleDto,
            MemberSummary,
            MemberFilterParams,
            PaginatedMembersResponse,
            Student,
            CreateStudentDto,
            StudentFilterParams,
            PaginatedStudentsResponse,
            StaffMember,
            StaffFilterParams,
            PaginatedStaffResponse,
            Invoice,
            InvoiceFilterParams,
            PaginatedInvoicesResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Schools", description = "School listing and selection"),
        (name = "Dashboard", description = "Current-school dashboard"),
        (name = "Roles", description = "Role and capability administration"),
        (name = "Members", description = "School membership administration"),
        (name = "Students", description = "Student records and admissions"),
        (name = "Staff", description = "Staff records"),
        (name = "Invoices", description = "Fee invoices")
    ),
    info(
        title = "Schoolhouse API",
        version = "0.1.0",
        description = "Multi-tenant school management API with role- and capability-based access control.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
