#![forbid(unsafe_code)]

//! End-to-end Toggle scenarios driven through the host.
//!
//! Each scenario starts with the toggle off, clicks "Toggle with callback"
//! (updater) and expects on, then clicks "Toggle with value" (literal) and
//! expects off again.

use dualstate_core::Mode;
use dualstate_harness::Result;
use dualstate_harness::host::{Component, Host};
use dualstate_harness::toggle::{
    Button, OFF_TEXT, ON_TEXT, OwnerStrategy, Toggle, ToggleOwner, ToggleProps, ToggleView,
};

fn assert_toggles<C: Component<View = ToggleView>>(root: C) -> Result<Host<C>> {
    let mut host = Host::mount(root)?;
    assert!(host.view().shows(OFF_TEXT));

    host.dispatch(|v| v.click_label(Button::ToggleWithCallback.label()))?;
    assert!(host.view().shows(ON_TEXT));

    host.dispatch(|v| v.click_label(Button::ToggleWithValue.label()))?;
    assert!(host.view().shows(OFF_TEXT));

    Ok(host)
}

#[test]
fn works_for_uncontrolled_components() {
    let host = assert_toggles(Toggle::new(ToggleProps::uncontrolled()).unwrap()).unwrap();
    assert_eq!(host.view().mode(), Mode::Uncontrolled);
}

#[test]
fn works_for_controlled_components_with_callback() {
    let owner = ToggleOwner::new(false, OwnerStrategy::FlipWithUpdater).unwrap();
    let host = assert_toggles(owner).unwrap();
    assert_eq!(host.view().mode(), Mode::Controlled);
    assert_eq!(host.root().notifications(), 2);
}

#[test]
fn works_for_controlled_components_with_value() {
    let owner = ToggleOwner::new(false, OwnerStrategy::FlipWithSnapshot).unwrap();
    let host = assert_toggles(owner).unwrap();
    assert_eq!(host.root().notifications(), 2);
}

#[test]
fn retrieves_the_correct_next_value_from_the_component() {
    let owner = ToggleOwner::new(false, OwnerStrategy::StoreNext).unwrap();
    let host = assert_toggles(owner).unwrap();
    assert!(!host.root().value());
}

#[test]
fn works_with_default_value() {
    let host = Host::mount(Toggle::new(ToggleProps::with_default(true)).unwrap()).unwrap();
    assert!(host.view().shows(ON_TEXT));
}

#[test]
fn controlled_click_leaves_view_until_owner_rerenders() {
    let owner = ToggleOwner::new(false, OwnerStrategy::StoreNext).unwrap();
    let host = Host::mount(owner).unwrap();

    // Click without settling: the view in hand is still the old one.
    let view = host.view().clone();
    view.click(Button::ToggleWithCallback);
    assert!(!view.is_on());
    assert!(host.root().value());
    assert!(host.root().needs_rerender());
}

#[test]
fn switching_to_uncontrolled_resumes_own_value() {
    let mut host = Host::mount(Toggle::new(ToggleProps::uncontrolled()).unwrap()).unwrap();
    host.dispatch(|v| v.click_label(Button::ToggleWithCallback.label()))
        .unwrap();
    assert!(host.view().is_on());
    let own_setter = host.view().setter().clone();

    // Hand control to an owner that keeps the toggle off.
    host.root_mut()
        .set_props(ToggleProps::controlled(false, std::rc::Rc::new(|_: bool| {})));
    host.rerender().unwrap();
    assert!(host.view().shows(OFF_TEXT));
    assert_eq!(host.view().mode(), Mode::Controlled);

    // A stale uncontrolled setter keeps writing the shadow value.
    own_setter.update(|on| !on);
    own_setter.update(|on| !on);
    host.settle().unwrap();
    assert!(host.view().shows(OFF_TEXT));

    host.root_mut().set_props(ToggleProps::uncontrolled());
    host.rerender().unwrap();
    assert!(host.view().shows(ON_TEXT));
    assert_eq!(host.view().mode(), Mode::Uncontrolled);
}
