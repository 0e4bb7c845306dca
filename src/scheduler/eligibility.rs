//! Eligibility resolution.
//!
//! Decides, per order, whether its next operation can be dispatched now and
//! on which machines.
//!
//! # Readiness
//! The platform keeps the last started stage on the order row until the
//! next one begins, so a recorded stage alone does not mean "running".
//! An order is in flight iff its recorded `end_time` lies after the
//! snapshot time, or a machine currently holds one of its tasks.
//!
//! A recorded stage without an end time cannot be told apart from a
//! running one. Such an order is held back and reported, unless a machine
//! holds it, which already makes it in flight.
//!
//! # Next Stage
//! - Unstarted: the first stage of the product type.
//! - Stage finished: the following stage, or complete after the last one.

use crate::models::{
    compare_ids, task_id, MachineOption, NextStage, Order, RoutingGap, RoutingGapKind, StageRoute,
};
use crate::snapshot::Snapshot;

/// An operation that may be dispatched in this call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyOperation<'a> {
    /// Task identifier `"{order_id}-{stage}"`.
    pub task_id: String,
    /// Owning order.
    pub order: &'a Order,
    /// Stage to perform.
    pub stage: &'a str,
    /// Machines able to perform the stage that exist on the shop floor,
    /// sorted by machine id. Never empty.
    pub candidates: Vec<&'a MachineOption>,
}

/// Readiness of one order.
#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility<'a> {
    /// The next operation can be dispatched.
    Ready(ReadyOperation<'a>),
    /// The current operation has not finished.
    InProgress,
    /// The order arrives after the snapshot time.
    NotArrived,
    /// The last stage has finished.
    Complete,
}

impl<'a> ReadyOperation<'a> {
    /// Owning order id.
    pub fn order_id(&self) -> &'a str {
        &self.order.order_id
    }

    /// Processing time on a machine, if the machine is a candidate.
    pub fn process_time_on(&self, machine_id: &str) -> Option<f64> {
        self.candidates
            .iter()
            .find(|o| o.machine_id == machine_id)
            .map(|o| o.process_time)
    }
}

/// Resolves the readiness of one order.
///
/// # Errors
/// A [`RoutingGap`] when the order is due for a next operation but the
/// routing table cannot place it.
pub fn resolve<'a>(order: &'a Order, snapshot: &'a Snapshot) -> Result<Eligibility<'a>, RoutingGap> {
    let now = snapshot.now();

    if order.arrival_time > now {
        return Ok(Eligibility::NotArrived);
    }
    if order.is_running_at(now)
        || snapshot
            .machines()
            .iter()
            .any(|m| m.holds_order(&order.order_id))
    {
        return Ok(Eligibility::InProgress);
    }

    let routing = snapshot.routing();
    let gap = |stage: Option<&str>, kind| {
        RoutingGap::new(
            order.order_id.clone(),
            order.product_type.clone(),
            stage.map(str::to_string),
            kind,
        )
    };

    if let (Some(current), None) = (order.current_stage.as_deref(), order.end_time) {
        return Err(gap(Some(current), RoutingGapKind::MissingEndTime));
    }

    let route: &StageRoute = match order.current_stage.as_deref() {
        None => routing
            .first_stage(&order.product_type)
            .ok_or_else(|| gap(None, RoutingGapKind::UnknownProductType))?,
        Some(current) => {
            if !routing.has_product(&order.product_type) {
                return Err(gap(None, RoutingGapKind::UnknownProductType));
            }
            match routing.next_stage(&order.product_type, current) {
                Some(NextStage::Stage(next)) => next,
                Some(NextStage::Complete) => return Ok(Eligibility::Complete),
                None => return Err(gap(Some(current), RoutingGapKind::UnknownStage)),
            }
        }
    };

    let candidates: Vec<&MachineOption> = route
        .options
        .iter()
        .filter(|o| snapshot.machine(&o.machine_id).is_some())
        .collect();
    if candidates.is_empty() {
        return Err(gap(Some(route.stage.as_str()), RoutingGapKind::NoKnownMachine));
    }

    Ok(Eligibility::Ready(ReadyOperation {
        task_id: task_id(&order.order_id, &route.stage),
        order,
        stage: &route.stage,
        candidates,
    }))
}

/// Resolves every order of a snapshot.
///
/// Ready operations are sorted by order id; routing gaps keep platform order.
pub fn resolve_all(snapshot: &Snapshot) -> (Vec<ReadyOperation<'_>>, Vec<RoutingGap>) {
    let mut ready = Vec::new();
    let mut gaps = Vec::new();

    for order in snapshot.orders() {
        match resolve(order, snapshot) {
            Ok(Eligibility::Ready(op)) => ready.push(op),
            Ok(_) => {}
            Err(gap) => gaps.push(gap),
        }
    }

    ready.sort_by(|a, b| compare_ids(a.order_id(), b.order_id()));
    (ready, gaps)
}
