//! Host-side picker controller.
//!
//! Owns the current [`CalendarState`], runs every dispatch through
//! [`calendar_reducer`] and reports selection changes to the host. While an
//! [`Activation`] is alive the picker also listens for pointer-downs and
//! closes the month/year dropdowns when one lands elsewhere.

use std::cell::{Cell, RefCell};
use std::ops::RangeInclusive;
use std::rc::Rc;

use chrono::{Datelike, Local, NaiveDate};

use crate::action::CalendarAction;
use crate::calendar_math::year_range;
use crate::date_range::DateRange;
use crate::error::{CalPickError, CalPickResult};
use crate::locale::LocaleSettings;
use crate::pointer::{PickerPart, PointerBus, PointerDown, Subscription};
use crate::reducer::calendar_reducer;
use crate::state::{CalendarState, PickerOptions};

/// Called with the date range, start time and end time.
pub type ChangeCallback = Box<dyn FnMut(&DateRange, &str, &str)>;

struct Inner {
    state: RefCell<CalendarState>,
    on_change: RefCell<Option<ChangeCallback>>,
    active: Cell<bool>,
}

impl Inner {
    fn dispatch(&self, action: CalendarAction) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let next = calendar_reducer(&state, action);
            let changed = next.selection() != state.selection();
            *state = next;
            changed
        };

        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        let (range, start_time, end_time) = {
            let state = self.state.borrow();
            (state.date_range, state.start_time.clone(), state.end_time.clone())
        };

        match self.on_change.try_borrow_mut() {
            Ok(mut callback) => {
                if let Some(callback) = callback.as_mut() {
                    callback(&range, &start_time, &end_time);
                }
            }
            Err(_) => tracing::warn!("Skipping change notification raised from inside onChange"),
        }
    }
}

/// A date/time range picker bound to one host.
pub struct DateTimePicker {
    inner: Rc<Inner>,
    years: RangeInclusive<i32>,
}

impl DateTimePicker {
    pub fn new(options: PickerOptions) -> Self {
        Self::new_at(options, Local::now().date_naive())
    }

    /// Like [`DateTimePicker::new`] with an explicit "today".
    pub fn new_at(options: PickerOptions, today: NaiveDate) -> Self {
        DateTimePicker {
            inner: Rc::new(Inner {
                state: RefCell::new(CalendarState::new_at(&options, today)),
                on_change: RefCell::new(None),
                active: Cell::new(false),
            }),
            years: year_range(today.year()),
        }
    }

    /// Report every change of range or times to `callback`.
    pub fn on_change<F>(self, callback: F) -> Self
    where
        F: FnMut(&DateRange, &str, &str) + 'static,
    {
        *self.inner.on_change.borrow_mut() = Some(Box::new(callback));
        self
    }

    /// Bring the picker to life: resolve the week layout for `locale`,
    /// start listening on `bus` and report the initial selection once.
    ///
    /// Only one activation may exist at a time.
    pub fn activate(&self, bus: &PointerBus, locale: &str) -> CalPickResult<Activation> {
        if self.inner.active.replace(true) {
            return Err(CalPickError::AlreadyActive);
        }

        let settings = LocaleSettings::for_locale(locale);
        tracing::debug!(
            locale,
            first_day_of_week = settings.first_day_of_week,
            "Resolved week layout"
        );
        self.dispatch(CalendarAction::SetLocaleSettings(settings));

        let inner = Rc::downgrade(&self.inner);
        let subscription = bus.subscribe(move |event: &PointerDown| {
            if event.closest(PickerPart::is_dropdown_chrome).is_some() {
                return;
            }
            if let Some(inner) = inner.upgrade() {
                inner.dispatch(CalendarAction::CloseAllPickers);
            }
        });

        self.inner.notify();

        Ok(Activation {
            inner: self.inner.clone(),
            _subscription: subscription,
        })
    }

    pub fn dispatch(&self, action: CalendarAction) {
        self.inner.dispatch(action);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CalendarState {
        self.inner.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Years offered by the year picker.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.years.clone()
    }

    pub fn handle_date_select(&self, date: NaiveDate) {
        self.dispatch(CalendarAction::SelectDate(date));
    }

    pub fn prev_month(&self) {
        self.dispatch(CalendarAction::PrevMonth);
    }

    pub fn next_month(&self) {
        self.dispatch(CalendarAction::NextMonth);
    }

    pub fn set_month(&self, month_index: i32) {
        self.dispatch(CalendarAction::SetMonth(month_index));
    }

    pub fn set_year(&self, year: i32) {
        self.dispatch(CalendarAction::SetYear(year));
    }

    pub fn toggle_time_picker(&self) {
        self.dispatch(CalendarAction::ToggleTimePicker);
    }

    pub fn toggle_month_picker(&self) {
        self.dispatch(CalendarAction::ToggleMonthPicker);
    }

    pub fn toggle_year_picker(&self) {
        self.dispatch(CalendarAction::ToggleYearPicker);
    }

    pub fn handle_start_time_change(&self, time: &str) {
        self.dispatch(CalendarAction::SetStartTime(time.to_string()));
    }

    pub fn handle_end_time_change(&self, time: &str) {
        self.dispatch(CalendarAction::SetEndTime(time.to_string()));
    }
}

/// Live picker activation. Dropping it stops the outside-click listener.
pub struct Activation {
    inner: Rc<Inner>,
    _subscription: Subscription,
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.inner.active.set(false);
    }
}
