use crate::form_engine::SlotRow;
use shared::Timestamp;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeSlotTableProps {
    pub date_headers: Vec<String>,
    pub rows: Vec<SlotRow>,
    pub on_select: Callback<Timestamp>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Week grid of half-hour slots; only bookable cells get a radio button
#[function_component(TimeSlotTable)]
pub fn time_slot_table(props: &TimeSlotTableProps) -> Html {
    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<Timestamp>() {
                Ok(starts_at) => on_select.emit(starts_at),
                Err(err) => log::warn!("ignoring slot value {:?}: {}", input.value(), err),
            }
        })
    };

    html! {
        <table id="time-slots">
            <thead>
                <tr>
                    <th></th>
                    {for props.date_headers.iter().map(|header| html! { <th>{header}</th> })}
                </tr>
            </thead>
            <tbody>
                {for props.rows.iter().map(|row| html! {
                    <tr>
                        <th>{&row.label}</th>
                        {for row.cells.iter().map(|cell| html! {
                            <td>
                                {if let Some(starts_at) = cell.starts_at {
                                    html! {
                                        <input
                                            type="radio"
                                            name="startsAt"
                                            value={starts_at.to_string()}
                                            checked={cell.checked}
                                            onchange={onchange.clone()}
                                            disabled={props.disabled}
                                        />
                                    }
                                } else { html! {} }}
                            </td>
                        })}
                    </tr>
                })}
            </tbody>
        </table>
    }
}
