mod delivery_worker;

pub(crate) use delivery_worker::DeliveryWorker;
