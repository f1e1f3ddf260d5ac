//! Admin role gate.

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*};

/// Only let principals with the admin role through. Must run after the auth
/// middleware.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let is_admin = match depot.principal_or_401() {
        Ok(principal) => principal.is_admin(),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !is_admin {
        res.render(ApiError::forbidden("Forbidden: Admin access required"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
