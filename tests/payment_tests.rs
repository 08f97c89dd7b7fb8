mod common;

use async_trait::async_trait;
use common::{mount, reach_payment};
use retreat_booking::application::wizard::{Advance, PaymentSettlement};
use retreat_booking::domain::ports::{PaymentGateway, PaymentOutcome, PaymentRequest};
use retreat_booking::domain::step::{Step, SubmissionState};
use retreat_booking::error::WizardError;
use retreat_booking::infrastructure::gateway::{GatewaySettings, SimulatedGateway};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Declines the first `declines` charges, then succeeds. Counts completions.
#[derive(Default)]
struct ScriptedGateway {
    declines: u32,
    started: AtomicU32,
    completed: AtomicU32,
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn charge(&self, _request: PaymentRequest) -> PaymentOutcome {
        let n = self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        if n < self.declines {
            PaymentOutcome::Failed("Issuer timeout".to_string())
        } else {
            PaymentOutcome::Succeeded
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_submission_is_rejected() {
    let gateway = Arc::new(SimulatedGateway::default());
    let (mut wizard, _) = mount(gateway.clone());
    reach_payment(&mut wizard);

    let pending = wizard.submit_payment().unwrap();
    assert_eq!(wizard.submission(), &SubmissionState::Pending);

    for _ in 0..3 {
        assert_eq!(
            wizard.submit_payment().unwrap_err(),
            WizardError::AlreadyPending
        );
    }

    wizard.apply_settlement(pending.wait().await).unwrap();
    assert_eq!(gateway.charges(), 1);
    assert_eq!(wizard.current_step(), Step::Confirmed);
}

#[tokio::test(start_paused = true)]
async fn test_decline_then_retry_succeeds() {
    let gateway = Arc::new(ScriptedGateway {
        declines: 1,
        ..ScriptedGateway::default()
    });
    let (mut wizard, notifier) = mount(gateway.clone());
    reach_payment(&mut wizard);

    let err = wizard.pay().await.unwrap_err();
    assert_eq!(err, WizardError::PaymentFailed("Issuer timeout".to_string()));
    assert_eq!(wizard.current_step(), Step::Payment);
    assert_eq!(
        wizard.submission(),
        &SubmissionState::Failed("Issuer timeout".to_string())
    );
    assert!(wizard.confirmation().is_none());

    let Ok(Advance::PaymentStarted(pending)) = wizard.advance() else {
        panic!("resubmitting from a failed payment should start a new attempt");
    };
    assert_eq!(pending.attempt(), 2);
    wizard.apply_settlement(pending.wait().await).unwrap();

    assert_eq!(wizard.current_step(), Step::Confirmed);
    assert_eq!(gateway.started.load(Ordering::SeqCst), 2);
    assert_eq!(
        notifier.titles(),
        vec![
            "Processing Payment",
            "Payment Failed",
            "Processing Payment",
            "Booking Confirmed"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_always_declining_simulation_never_confirms() {
    let gateway = Arc::new(SimulatedGateway::new(GatewaySettings {
        failure_rate: 1.0,
        seed: Some(5),
        ..GatewaySettings::default()
    }));
    let (mut wizard, _) = mount(gateway.clone());
    reach_payment(&mut wizard);

    for _ in 0..3 {
        assert!(matches!(
            wizard.pay().await,
            Err(WizardError::PaymentFailed(_))
        ));
        assert_eq!(wizard.current_step(), Step::Payment);
    }
    assert_eq!(gateway.charges(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_settlement_outliving_unmount_cannot_confirm_remount() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (mut wizard, _) = mount(gateway.clone());
    reach_payment(&mut wizard);
    let pending = wizard.submit_payment().unwrap();
    wizard.unmount();

    let settlement = pending.wait().await;
    assert_eq!(settlement.outcome, PaymentOutcome::Succeeded);

    // Navigating back mounts a fresh wizard; the old charge must not confirm it.
    let (mut remounted, notifier) = mount(gateway);
    reach_payment(&mut remounted);
    let before = remounted.snapshot();

    assert_eq!(
        remounted.apply_settlement(settlement),
        Err(WizardError::StaleSettlement { attempt: 1 })
    );
    assert_eq!(remounted.snapshot(), before);
    assert_eq!(remounted.submission(), &SubmissionState::Idle);
    assert!(remounted.confirmation().is_none());
    assert!(notifier.titles().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_pending_payment_aborts_call() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (mut wizard, _) = mount(gateway.clone());
    reach_payment(&mut wizard);

    let pending = wizard.submit_payment().unwrap();
    tokio::task::yield_now().await;
    drop(pending);
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(gateway.completed.load(Ordering::SeqCst), 0);
    assert_eq!(wizard.submission(), &SubmissionState::Pending);
}

#[tokio::test(start_paused = true)]
async fn test_settlement_from_previous_attempt_is_ignored() {
    let gateway = Arc::new(ScriptedGateway {
        declines: 1,
        ..ScriptedGateway::default()
    });
    let (mut wizard, _) = mount(gateway);
    reach_payment(&mut wizard);

    let first = wizard.submit_payment().unwrap();
    let first_settlement = first.wait().await;
    assert!(wizard.apply_settlement(first_settlement.clone()).is_err());

    let second = wizard.submit_payment().unwrap();
    let before = wizard.snapshot();
    assert_eq!(
        wizard.apply_settlement(PaymentSettlement {
            attempt: first_settlement.attempt,
            outcome: PaymentOutcome::Succeeded,
        }),
        Err(WizardError::StaleSettlement { attempt: 1 })
    );
    assert_eq!(wizard.snapshot(), before);

    wizard.apply_settlement(second.wait().await).unwrap();
    assert_eq!(wizard.current_step(), Step::Confirmed);
}
