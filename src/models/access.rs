//! Capability-based access policy
//!
//! A role is turned into a set of capabilities once, at login. Handlers and
//! clients only ever ask "is this capability granted?" or "which views may
//! this session open?".

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::Role;

/// An action a session may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewDashboard,
    ViewUsers,
    ManageUsers,
    ViewStaff,
    ViewRooms,
    ManageRooms,
    ViewBookings,
    ManageBookings,
    CreateOwnBooking,
    ViewOwnBookings,
    ViewServiceRequests,
    ManageServiceRequests,
}

/// A dashboard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Users,
    AddUser,
    Rooms,
    AddRoom,
    BookingCalendar,
    BookingsForDate,
    AddBooking,
    MyBookings,
    ServiceRequests,
    AddServiceRequest,
    Reports,
}

impl View {
    pub const ALL: [View; 12] = [
        View::Dashboard,
        View::Users,
        View::AddUser,
        View::Rooms,
        View::AddRoom,
        View::BookingCalendar,
        View::BookingsForDate,
        View::AddBooking,
        View::MyBookings,
        View::ServiceRequests,
        View::AddServiceRequest,
        View::Reports,
    ];

    /// Capabilities that open this view (any one is enough)
    pub fn required(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            View::Dashboard | View::Reports => &[ViewDashboard],
            View::Users => &[ViewUsers],
            View::AddUser => &[ManageUsers],
            View::Rooms => &[ViewRooms],
            View::AddRoom => &[ManageRooms],
            View::BookingCalendar | View::BookingsForDate => &[ViewBookings],
            View::AddBooking => &[ManageBookings, CreateOwnBooking],
            View::MyBookings => &[ViewOwnBookings],
            View::ServiceRequests => &[ViewServiceRequests],
            View::AddServiceRequest => &[ManageServiceRequests],
        }
    }
}

/// Capabilities granted to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessPolicy {
    pub capabilities: Vec<Capability>,
}

impl AccessPolicy {
    pub fn for_role(role: Role) -> Self {
        use Capability::*;
        let mut capabilities = match role {
            Role::Admin => vec![
                ViewDashboard,
                ViewUsers,
                ManageUsers,
                ViewStaff,
                ViewRooms,
                ManageRooms,
                ViewBookings,
                ManageBookings,
                CreateOwnBooking,
                ViewOwnBookings,
                ViewServiceRequests,
                ManageServiceRequests,
            ],
            Role::Staff => vec![
                ViewDashboard,
                ViewStaff,
                ViewRooms,
                ViewBookings,
                ManageBookings,
                ViewOwnBookings,
                ViewServiceRequests,
                ManageServiceRequests,
            ],
            Role::User => vec![ViewRooms, CreateOwnBooking, ViewOwnBookings],
        };
        capabilities.sort();
        Self { capabilities }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Views this policy may open, in menu order
    pub fn views(&self) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|view| view.required().iter().any(|c| self.allows(*c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_every_view() {
        assert_eq!(AccessPolicy::for_role(Role::Admin).views(), View::ALL.to_vec());
    }

    #[test]
    fn test_guest_views() {
        let policy = AccessPolicy::for_role(Role::User);
        assert_eq!(
            policy.views(),
            vec![View::Rooms, View::AddBooking, View::MyBookings]
        );
        assert!(!policy.allows(Capability::ManageBookings));
        assert!(!policy.allows(Capability::ViewBookings));
    }

    #[test]
    fn test_staff_cannot_manage_users_or_rooms() {
        let policy = AccessPolicy::for_role(Role::Staff);
        assert!(policy.allows(Capability::ManageServiceRequests));
        assert!(policy.allows(Capability::ViewStaff));
        assert!(!policy.allows(Capability::ManageUsers));
        assert!(!policy.allows(Capability::ManageRooms));
        assert!(!policy.views().contains(&View::Users));
    }

    #[test]
    fn test_policy_survives_serialization() {
        let policy = AccessPolicy::for_role(Role::Staff);
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("manage_service_requests"));
        let back: AccessPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
